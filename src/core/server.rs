//! MCP server handler.
//!
//! `McpServer` owns the preferences store and the resource, prompt and tool
//! services, and answers MCP requests by delegating to them. STDIO and TCP
//! go through the rmcp `ServerHandler` impl; the HTTP transport calls the
//! `serde_json::Value` helpers below.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::settings::{MemorySettingsStore, Preferences, Theme};
use crate::domains::{
    prompts::{PromptError, PromptService},
    resources::{ResourceError, ResourceService},
    tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

const INSTRUCTIONS: &str = "Developer utilities. Numeric: base_convert (bin/oct/dec/hex, \
arbitrary size), unit_convert and unit_categories (length, weight, temperature, data), \
statistics (descriptive statistics of a number list). Text: text_case, text_codec, \
json_format, uuid_generate, regex_test, lorem_ipsum. Code: hash_text, jwt_decode. Security: password_generate, \
data_sanitize. Use catalog_search to find a tool and preferences for theme and name. \
Resources under devtools:// expose the catalog, unit tables and current preferences.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Theme and display name shared by the preferences tool and resource.
    preferences: Preferences,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let preferences = Preferences::new(Arc::new(MemorySettingsStore::new()));
        if config.preferences.default_theme != Theme::System {
            info!("Default theme: {}", config.preferences.default_theme);
            preferences.set_theme(config.preferences.default_theme);
        }

        let resource_service = Arc::new(ResourceService::new(config.clone(), preferences.clone()));
        let prompt_service = Arc::new(PromptService::new());

        Self {
            tool_router: build_tool_router::<Self>(config.clone(), preferences.clone()),
            config,
            preferences,
            resource_service,
            prompt_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration (for tool access).
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Preferences shared by every session of this server.
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.config.clone(), self.preferences.clone());
        registry.call_tool(name, arguments)
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available resource templates (for HTTP transport).
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    /// List all available prompts (for HTTP transport).
    pub async fn list_prompts(&self) -> Vec<serde_json::Value> {
        let prompts = self.prompt_service.list_prompts().await;

        prompts
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Get a prompt by name (for HTTP transport).
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, String> {
        // Convert serde_json::Value to HashMap<String, String>
        let args = arguments.and_then(|v| {
            v.as_object().map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        });

        match self.prompt_service.get_prompt(name, args).await {
            Ok(result) => Ok(serde_json::json!({
                "description": result.description,
                "messages": result.messages
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| match e {
                ResourceError::NotFound(_) => McpError::resource_not_found(e.to_string(), None),
                ResourceError::InvalidUri(_) => McpError::invalid_params(e.to_string(), None),
                ResourceError::Internal(_) => McpError::internal_error(e.to_string(), None),
            })
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        // Convert serde_json::Map to HashMap<String, String>
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| match e {
                PromptError::TemplateError(_) => McpError::internal_error(e.to_string(), None),
                _ => McpError::invalid_params(e.to_string(), None),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_identity() {
        let server = McpServer::new(Config::default());
        assert_eq!(server.name(), "devtools-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));

        let info = server.get_info();
        assert_eq!(info.server_info.name, "devtools-mcp-server");
        assert!(info.instructions.unwrap().contains("base_convert"));
    }

    #[test]
    fn test_default_theme_applied() {
        let mut config = Config::default();
        config.preferences.default_theme = Theme::Dark;
        let server = McpServer::new(config);
        assert_eq!(server.preferences().theme(), Theme::Dark);
    }

    #[test]
    fn test_list_tools_for_http() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        assert_eq!(tools.len(), 16);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
    }

    #[tokio::test]
    async fn test_preferences_shared_with_resources() {
        let server = McpServer::new(Config::default());
        server.preferences().set_name("Ada");
        let value = server.read_resource("devtools://preferences").await.unwrap();
        let text = value["contents"][0]["text"].as_str().unwrap();
        assert!(text.contains("Ada"));
    }

    #[tokio::test]
    async fn test_get_prompt_for_http() {
        let server = McpServer::new(Config::default());
        let result = server
            .get_prompt(
                "explain_number",
                Some(serde_json::json!({ "value": "10" })),
            )
            .await
            .unwrap();
        assert_eq!(result["messages"][0]["role"], "user");

        let missing = server.get_prompt("explain_number", None).await;
        assert!(missing.is_err());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_for_http() {
        let server = McpServer::new(Config::default());
        let value = server
            .call_tool("preferences", serde_json::json!({ "action": "set", "key": "theme", "value": "light" }))
            .await
            .unwrap();
        assert_eq!(value["structuredContent"]["theme"], "light");
        assert_eq!(server.preferences().theme(), Theme::Light);

        let missing = server.call_tool("nope", serde_json::json!({})).await;
        assert!(matches!(missing, Err(ToolError::NotFound(_))));
    }
}
