//! Numeral base converter tool.
//!
//! Re-renders a number typed in one base into binary, octal, decimal and
//! hexadecimal. Clients that keep the four fields on screen can send them
//! back as `previous` so that a rejected edit leaves the other fields intact.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::super::common::structured_result;
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};
use crate::domains::numeric::{Base, BaseConversion, BaseConverter, BaseRepresentations};

/// Parameters for the base conversion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BaseConvertParams {
    /// Digits as typed by the user. Empty clears every field.
    pub value: String,

    /// Base the digits are written in: bin, oct, dec or hex.
    #[serde(default = "default_base")]
    pub base: Base,

    /// Field contents shown before this edit.
    #[serde(default)]
    pub previous: Option<BaseRepresentations>,
}

fn default_base() -> Base {
    Base::Dec
}

/// Base conversion tool - converts between bin, oct, dec and hex.
pub struct BaseConvertTool;

impl BaseConvertTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "base_convert";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert a non-negative integer between binary, octal, decimal and hexadecimal. \
         Returns all four representations. Invalid digits produce an error and keep the previous values.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(base = %params.base))]
    pub fn execute(params: &BaseConvertParams) -> CallToolResult {
        info!("Base convert tool called with {} digits", params.value.len());

        let mut converter = match &params.previous {
            Some(fields) => BaseConverter::with_fields(fields.clone()),
            None => BaseConverter::new(),
        };
        let conversion = converter.on_digits_changed(&params.value, params.base);

        match &conversion.error {
            Some(message) => {
                warn!("Rejected {} input: {}", params.base, message);
                structured_result(message.clone(), &conversion, true)
            }
            None => structured_result(summarize(&conversion), &conversion, false),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: BaseConvertParams = parse_arguments(arguments)?;
        info!("Base convert tool (HTTP) called");
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<BaseConvertParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<BaseConversion>()),
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
                let params: BaseConvertParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

fn summarize(conversion: &BaseConversion) -> String {
    if conversion.fields.is_empty() {
        return "All fields cleared".to_string();
    }

    let mut lines: Vec<String> = Base::ALL
        .iter()
        .map(|b| format!("{:<8} {}", format!("{}:", b), conversion.fields.get(*b)))
        .collect();
    if !conversion.safe_integer {
        lines.push("Note: value exceeds 2^53 - 1, outside the safe integer range of a double".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::super::super::common::first_text;
    use super::*;

    fn params(value: &str, base: Base) -> BaseConvertParams {
        BaseConvertParams {
            value: value.to_string(),
            base,
            previous: None,
        }
    }

    #[test]
    fn test_binary_input() {
        let result = BaseConvertTool::execute(&params("1010", Base::Bin));
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["bin"], "1010");
        assert_eq!(structured["oct"], "12");
        assert_eq!(structured["dec"], "10");
        assert_eq!(structured["hex"], "A");
        assert_eq!(structured["safe_integer"], true);
    }

    #[test]
    fn test_invalid_digit_keeps_previous() {
        let previous = BaseRepresentations {
            bin: "1111".to_string(),
            oct: "17".to_string(),
            dec: "15".to_string(),
            hex: "F".to_string(),
        };
        let result = BaseConvertTool::execute(&BaseConvertParams {
            value: "FG".to_string(),
            base: Base::Hex,
            previous: Some(previous),
        });

        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).contains('G'));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["hex"], "FG");
        assert_eq!(structured["dec"], "15");
        assert_eq!(structured["bin"], "1111");
    }

    #[test]
    fn test_empty_clears() {
        let result = BaseConvertTool::execute(&params("", Base::Dec));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(first_text(&result), "All fields cleared");
        assert_eq!(result.structured_content.unwrap()["dec"], "");
    }

    #[test]
    fn test_large_value_flags_unsafe_integer() {
        let result = BaseConvertTool::execute(&params("9007199254740993", Base::Dec));
        assert!(first_text(&result).contains("safe integer range"));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["hex"], "20000000000001");
        assert_eq!(structured["safe_integer"], false);
    }

    #[test]
    fn test_params_accept_base_aliases() {
        let p: BaseConvertParams =
            serde_json::from_value(serde_json::json!({ "value": "ff", "base": "hexadecimal" }))
                .unwrap();
        assert_eq!(p.base, Base::Hex);

        let p: BaseConvertParams =
            serde_json::from_value(serde_json::json!({ "value": "42" })).unwrap();
        assert_eq!(p.base, Base::Dec);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler() {
        let result =
            BaseConvertTool::http_handler(serde_json::json!({ "value": "777", "base": "oct" }))
                .unwrap();
        assert_eq!(result["structuredContent"]["dec"], "511");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_missing_value() {
        let result = BaseConvertTool::http_handler(serde_json::json!({ "base": "bin" }));
        assert!(result.is_err());
    }
}
