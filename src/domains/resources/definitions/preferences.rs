//! Current preferences resource.

use rmcp::model::ResourceContents;

use super::{DynamicResourceProvider, ResourceDefinition, json_contents};
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent, ResourceContext};

/// Theme and display name from the settings store.
pub struct PreferencesResource;

impl ResourceDefinition for PreferencesResource {
    const URI: &'static str = "devtools://preferences";
    const NAME: &'static str = "User Preferences";
    const DESCRIPTION: &'static str = "Current theme and display name";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::Preferences)
    }
}

impl DynamicResourceProvider for PreferencesResource {
    fn resolve(uri: &str, context: &ResourceContext) -> Result<ResourceContents, ResourceError> {
        json_contents(uri, &context.preferences.snapshot())
    }
}
