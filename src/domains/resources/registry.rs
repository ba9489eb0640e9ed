//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use rmcp::model::{AnnotateAble, RawResource, ResourceTemplate};

use super::definitions::{
    CatalogResource, NumberGuideResource, PreferencesResource, ResourceDefinition,
    ServerInfoResource, UnitCategoryTemplate, UnitsResource,
};
use super::service::ResourceEntry;

fn build_resource<R: ResourceDefinition>() -> ResourceEntry {
    let mut raw = RawResource::new(R::URI, R::NAME);
    raw.description = Some(R::DESCRIPTION.to_string());
    raw.mime_type = Some(R::MIME_TYPE.to_string());

    ResourceEntry {
        resource: raw.no_annotation(),
        content: R::content(),
    }
}

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    vec![
        build_resource::<ServerInfoResource>(),
        build_resource::<CatalogResource>(),
        build_resource::<UnitsResource>(),
        build_resource::<PreferencesResource>(),
        build_resource::<NumberGuideResource>(),
    ]
}

/// Get all registered resource templates (RFC 6570 URI templates).
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![UnitCategoryTemplate::template()]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<&'static str> {
    vec![
        ServerInfoResource::URI,
        CatalogResource::URI,
        UnitsResource::URI,
        PreferencesResource::URI,
        NumberGuideResource::URI,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert_eq!(uris, resource_uris());
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "devtools://units/{category}");
    }
}
