//! JSON formatter and validator tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{info, instrument};

use super::super::common::{error_result, success_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};

/// Largest accepted indent width.
pub const MAX_INDENT: usize = 8;

/// Parameters for the JSON formatter tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JsonFormatParams {
    /// JSON document to format.
    pub json: String,

    /// Spaces per level (0-8). 0 minifies.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    2
}

/// JSON formatter tool.
pub struct JsonFormatTool;

impl JsonFormatTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "json_format";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Validate and pretty-print JSON with the given indent, or minify it with indent 0. \
         Key order is preserved.";

    #[instrument(skip_all, fields(indent = params.indent))]
    pub fn execute(params: &JsonFormatParams) -> CallToolResult {
        info!("JSON format tool called with {} bytes", params.json.len());

        if params.indent > MAX_INDENT {
            return error_result(&format!("Indent must be between 0 and {}", MAX_INDENT));
        }
        if params.json.trim().is_empty() {
            return error_result("Input is empty");
        }

        match format_json(&params.json, params.indent) {
            Ok(formatted) => success_result(formatted),
            Err(e) => error_result(&format!("Invalid JSON: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: JsonFormatParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<JsonFormatParams>(),
            annotations: None,
            output_schema: None,
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
                let params: JsonFormatParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

/// Re-serialize `input` with `indent` spaces per level.
pub fn format_json(input: &str, indent: usize) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if indent == 0 {
        return serde_json::to_string(&value);
    }

    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;

    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
