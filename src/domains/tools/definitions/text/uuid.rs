//! UUID generator tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::super::common::{error_result, structured_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};
use crate::core::config::Config;

/// Parameters for the UUID generator tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UuidGenerateParams {
    /// How many UUIDs to generate (default 1).
    #[serde(default = "default_count")]
    pub count: usize,

    /// Keep the dashes (default true).
    #[serde(default = "default_hyphens")]
    pub hyphens: bool,

    /// Upper-case hex digits.
    #[serde(default)]
    pub uppercase: bool,
}

fn default_count() -> usize {
    1
}

fn default_hyphens() -> bool {
    true
}

/// Structured output of the UUID generator.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct UuidList {
    pub uuids: Vec<String>,
}

/// UUID generator tool.
pub struct UuidGenerateTool;

impl UuidGenerateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "uuid_generate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate random version 4 UUIDs, optionally without dashes or in upper case.";

    #[instrument(skip_all, fields(count = params.count))]
    pub fn execute(params: &UuidGenerateParams, config: &Config) -> CallToolResult {
        let max = config.tools.max_uuids;
        if params.count == 0 || params.count > max {
            return error_result(&format!("Count must be between 1 and {}", max));
        }

        let uuids: Vec<String> = (0..params.count)
            .map(|_| format_uuid(Uuid::new_v4(), params.hyphens, params.uppercase))
            .collect();

        info!("Generated {} UUIDs", uuids.len());
        structured_result(uuids.join("\n"), &UuidList { uuids }, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: UuidGenerateParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params, &config))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UuidGenerateParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<UuidList>()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: UuidGenerateParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

fn format_uuid(id: Uuid, hyphens: bool, uppercase: bool) -> String {
    let text = if hyphens {
        id.hyphenated().to_string()
    } else {
        id.simple().to_string()
    };
    if uppercase { text.to_uppercase() } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(count: usize, hyphens: bool, uppercase: bool) -> CallToolResult {
        UuidGenerateTool::execute(
            &UuidGenerateParams {
                count,
                hyphens,
                uppercase,
            },
            &Config::default(),
        )
    }

    fn uuids(result: CallToolResult) -> Vec<String> {
        let structured = result.structured_content.unwrap();
        serde_json::from_value(structured["uuids"].clone()).unwrap()
    }

    #[test]
    fn test_default_format() {
        let ids = uuids(generate(3, true, false));
        assert_eq!(ids.len(), 3);
        for id in &ids {
            assert_eq!(id.len(), 36);
            assert_eq!(id.as_bytes()[14], b'4');
            assert_eq!(id.to_lowercase(), *id);
        }
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_no_hyphens_uppercase() {
        let ids = uuids(generate(1, false, true));
        assert_eq!(ids[0].len(), 32);
        assert!(!ids[0].contains('-'));
        assert_eq!(ids[0].to_uppercase(), ids[0]);
    }

    #[test]
    fn test_count_bounds() {
        assert!(generate(0, true, false).is_error.unwrap_or(false));
        assert!(generate(101, true, false).is_error.unwrap_or(false));
        assert_eq!(uuids(generate(100, true, false)).len(), 100);
    }

    #[test]
    fn test_defaults_from_json() {
        let p: UuidGenerateParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.count, 1);
        assert!(p.hyphens);
        assert!(!p.uppercase);
    }
}
