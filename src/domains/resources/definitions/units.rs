//! Unit table resources.
//!
//! `devtools://units` lists every category; the template
//! `devtools://units/{category}` returns a single one.

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceContents, ResourceTemplate};
use serde::Serialize;

use super::{DynamicResourceProvider, ResourceDefinition, json_contents};
use crate::domains::numeric::units::on_category_changed;
use crate::domains::numeric::{CategoryDefaults, UnitCategory};
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent, ResourceContext};

/// All unit tables.
pub struct UnitsResource;

#[derive(Serialize)]
struct UnitTables {
    categories: Vec<CategoryDefaults>,
}

impl ResourceDefinition for UnitsResource {
    const URI: &'static str = "devtools://units";
    const NAME: &'static str = "Unit Tables";
    const DESCRIPTION: &'static str =
        "Units of every category with their factors and the default from/to selection";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::Units)
    }
}

impl DynamicResourceProvider for UnitsResource {
    fn resolve(uri: &str, _context: &ResourceContext) -> Result<ResourceContents, ResourceError> {
        let tables = UnitTables {
            categories: UnitCategory::ALL.iter().map(|c| on_category_changed(*c)).collect(),
        };
        json_contents(uri, &tables)
    }
}

/// Per-category unit table, addressed by URI template.
pub struct UnitCategoryTemplate;

impl UnitCategoryTemplate {
    pub const URI_TEMPLATE: &'static str = "devtools://units/{category}";
    const PREFIX: &'static str = "devtools://units/";

    pub fn template() -> ResourceTemplate {
        RawResourceTemplate {
            uri_template: Self::URI_TEMPLATE.to_string(),
            name: "Unit Category".to_string(),
            title: Some("Units of one category".to_string()),
            description: Some(
                "Units of a single category: length, weight, temperature or data".to_string(),
            ),
            mime_type: Some("application/json".to_string()),
        }
        .no_annotation()
    }

    /// Whether `uri` falls under this template.
    pub fn matches(uri: &str) -> bool {
        uri.starts_with(Self::PREFIX)
    }

    pub fn resolve(uri: &str) -> Result<ResourceContents, ResourceError> {
        let name = uri
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| ResourceError::not_found(uri))?;
        let category = name
            .parse::<UnitCategory>()
            .map_err(|e| ResourceError::invalid_uri(format!("{uri}: {e}")))?;
        json_contents(uri, &on_category_changed(category))
    }
}
