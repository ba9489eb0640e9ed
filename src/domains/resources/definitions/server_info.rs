//! Server info resource definition.

use rmcp::model::ResourceContents;
use serde::Serialize;

use super::{DynamicResourceProvider, ResourceDefinition, json_contents};
use crate::domains::resources::error::ResourceError;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent, ResourceContext};
use crate::domains::tools::ToolRegistry;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

#[derive(Serialize)]
struct ServerInfo<'a> {
    server: &'a str,
    version: &'a str,
    transport: String,
    tools: Vec<&'static str>,
    limits: Limits,
}

#[derive(Serialize)]
struct Limits {
    max_uuids: usize,
    max_password_length: usize,
}

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "devtools://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Name, version, transport, registered tools and limits of this server";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}

impl DynamicResourceProvider for ServerInfoResource {
    fn resolve(uri: &str, context: &ResourceContext) -> Result<ResourceContents, ResourceError> {
        let config = &context.config;
        let registry = ToolRegistry::new(config.clone(), context.preferences.clone());
        let info = ServerInfo {
            server: &config.server.name,
            version: &config.server.version,
            transport: config.transport.description(),
            tools: registry.tool_names(),
            limits: Limits {
                max_uuids: config.tools.max_uuids,
                max_password_length: config.tools.max_password_length,
            },
        };
        json_contents(uri, &info)
    }
}
