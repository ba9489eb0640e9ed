//! Catalog search tool, the MCP counterpart of the global search box.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::common::structured_result;
#[cfg(feature = "http")]
use super::common::{parse_arguments, to_http_response};
use crate::domains::catalog::{self, CatalogEntry, DEFAULT_SEARCH_LIMIT};

/// Parameters for the catalog search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CatalogSearchParams {
    /// Case-insensitive text matched against names and descriptions.
    pub query: String,

    /// Maximum number of matches (default 5).
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

/// One search hit.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CatalogHit {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    /// Category the entry belongs to.
    pub category: &'static str,
}

/// Structured output of the catalog search.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct CatalogSearchOutput {
    pub matches: Vec<CatalogHit>,
}

/// Catalog search tool.
pub struct CatalogSearchTool;

impl CatalogSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "catalog_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the developer tool catalog by name or description. \
         Entries served by this server list the MCP tool to call.";

    #[instrument(skip_all, fields(query = %params.query))]
    pub fn execute(params: &CatalogSearchParams) -> CallToolResult {
        info!("Catalog search called (limit {})", params.limit);

        let matches: Vec<CatalogHit> = catalog::search(&params.query, params.limit)
            .into_iter()
            .map(|entry| CatalogHit {
                entry: *entry,
                category: catalog::category_of(entry.id).map_or("", |c| c.id),
            })
            .collect();

        let summary = if matches.is_empty() {
            format!("No tools match '{}'", params.query)
        } else {
            matches
                .iter()
                .map(|hit| match hit.entry.mcp_tool {
                    Some(tool) => format!("{} - {} [tool: {}]", hit.entry.name, hit.entry.description, tool),
                    None => format!("{} - {}", hit.entry.name, hit.entry.description),
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        structured_result(summary, &CatalogSearchOutput { matches }, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: CatalogSearchParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CatalogSearchParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<CatalogSearchOutput>()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: CatalogSearchParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}
