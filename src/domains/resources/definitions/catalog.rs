//! Tool catalog resource.

use rmcp::model::ResourceContents;

use super::{DynamicResourceProvider, ResourceDefinition, json_contents};
use crate::domains::catalog::CATALOG;
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent, ResourceContext};

/// The categorized tool catalog as JSON.
pub struct CatalogResource;

impl ResourceDefinition for CatalogResource {
    const URI: &'static str = "devtools://catalog";
    const NAME: &'static str = "Tool Catalog";
    const DESCRIPTION: &'static str =
        "Categories and tools of the dev-tools collection, with the MCP tool implementing each";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::Catalog)
    }
}

impl DynamicResourceProvider for CatalogResource {
    fn resolve(uri: &str, _context: &ResourceContext) -> Result<ResourceContents, ResourceError> {
        json_contents(uri, &CATALOG)
    }
}
