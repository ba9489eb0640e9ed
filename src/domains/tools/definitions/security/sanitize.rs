//! Data sanitizer tool: line-oriented cleanup of pasted data.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{info, instrument};

use super::super::common::success_result;
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};

const PUNCTUATION: &str = ".,/#!$%^&*;:{}=-_`~()";

/// Parameters for the data sanitizer tool. Steps run in field order.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DataSanitizeParams {
    /// Text to clean, processed line by line.
    pub text: String,

    /// Trim leading and trailing whitespace (default true).
    #[serde(default = "enabled")]
    pub trim_whitespace: bool,

    /// Drop empty lines (default true).
    #[serde(default = "enabled")]
    pub remove_empty_lines: bool,

    /// Strip common punctuation.
    #[serde(default)]
    pub remove_punctuation: bool,

    /// Lower-case every line.
    #[serde(default)]
    pub lowercase: bool,

    /// Keep only the first occurrence of each line.
    #[serde(default)]
    pub remove_duplicates: bool,
}

fn enabled() -> bool {
    true
}

/// Run the enabled cleanup steps over `params.text`.
pub fn sanitize(params: &DataSanitizeParams) -> String {
    let mut lines: Vec<String> = params.text.split('\n').map(str::to_string).collect();

    if params.trim_whitespace {
        lines = lines.into_iter().map(|l| l.trim().to_string()).collect();
    }
    if params.remove_empty_lines {
        lines.retain(|l| !l.is_empty());
    }
    if params.remove_punctuation {
        for line in &mut lines {
            line.retain(|c| !PUNCTUATION.contains(c));
        }
    }
    if params.lowercase {
        lines = lines.into_iter().map(|l| l.to_lowercase()).collect();
    }
    if params.remove_duplicates {
        let mut seen = HashSet::new();
        lines.retain(|l| seen.insert(l.clone()));
    }

    lines.join("\n")
}

/// Data sanitizer tool.
pub struct DataSanitizeTool;

impl DataSanitizeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "data_sanitize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Clean text line by line: trim whitespace, drop empty lines, strip punctuation, \
         lower-case and remove duplicate lines (in that order).";

    #[instrument(skip_all)]
    pub fn execute(params: &DataSanitizeParams) -> CallToolResult {
        info!("Data sanitize tool called with {} lines", params.text.lines().count());
        success_result(sanitize(params))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: DataSanitizeParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DataSanitizeParams>(),
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
                let params: DataSanitizeParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(text: &str) -> DataSanitizeParams {
        serde_json::from_value(serde_json::json!({ "text": text })).unwrap()
    }

    #[test]
    fn test_defaults_trim_and_drop_empty() {
        assert_eq!(sanitize(&params("  a  \n\n b\n   \n")), "a\nb");
    }

    #[test]
    fn test_all_steps() {
        let mut p = params(" Foo, Bar! \nfoo bar\n(baz)\n");
        p.remove_punctuation = true;
        p.lowercase = true;
        p.remove_duplicates = true;
        assert_eq!(sanitize(&p), "foo bar\nbaz");
    }

    #[test]
    fn test_dedupe_happens_after_lowercase() {
        let mut p = params("A\na");
        p.remove_duplicates = true;
        assert_eq!(sanitize(&p), "A\na");
        p.lowercase = true;
        assert_eq!(sanitize(&p), "a");
    }

    #[test]
    fn test_punctuation_keeps_quotes_and_brackets() {
        let mut p = params("it's [x] @home?");
        p.remove_punctuation = true;
        assert_eq!(sanitize(&p), "it's [x] @home?");
    }

    #[test]
    fn test_everything_off() {
        let mut p = params(" x \n\n");
        p.trim_whitespace = false;
        p.remove_empty_lines = false;
        assert_eq!(sanitize(&p), " x \n\n");
    }
}
