//! Unit converter tools.
//!
//! `unit_convert` converts a value inside one category; `unit_categories`
//! returns the unit tables with the selector defaults a client should show
//! after switching category.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::super::common::{error_result, structured_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};
use crate::domains::numeric::units::{self, DEFAULT_VALUE, on_category_changed, on_value_changed};
use crate::domains::numeric::{CategoryDefaults, UnitCategory};

/// Fraction digits kept in the formatted result.
const DISPLAY_FRACTION_DIGITS: usize = 6;

// ============================================================================
// unit_convert
// ============================================================================

/// Parameters for the unit conversion tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UnitConvertParams {
    /// Value to convert. Defaults to 1.
    #[serde(default = "default_value")]
    pub value: f64,

    /// Source unit symbol (e.g. "km", "lb", "f", "gb").
    pub from: String,

    /// Target unit symbol.
    pub to: String,

    /// Category both units belong to.
    pub category: UnitCategory,
}

fn default_value() -> f64 {
    DEFAULT_VALUE
}

/// Structured output of a unit conversion.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct UnitConversionOutput {
    pub category: UnitCategory,
    pub value: f64,
    pub from: String,
    pub to: String,
    /// Unrounded result.
    pub result: f64,
    /// Result with at most six fraction digits.
    pub formatted: String,
}

/// Unit conversion tool.
pub struct UnitConvertTool;

impl UnitConvertTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "unit_convert";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert a value between units of length, weight, temperature or digital storage. \
         Both units must belong to the given category.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(category = %params.category, from = %params.from, to = %params.to))]
    pub fn execute(params: &UnitConvertParams) -> CallToolResult {
        info!("Unit convert tool called with value {}", params.value);

        if !params.value.is_finite() {
            return error_result("Value must be a finite number");
        }

        let result = match on_value_changed(params.value, &params.from, &params.to, params.category)
        {
            Ok(r) => r,
            Err(e) => return error_result(&e.to_string()),
        };
        if !result.is_finite() {
            return error_result("Result overflows the f64 range");
        }

        let output = UnitConversionOutput {
            category: params.category,
            value: params.value,
            from: params.from.trim().to_lowercase(),
            to: params.to.trim().to_lowercase(),
            result,
            formatted: units::format_display(result, DISPLAY_FRACTION_DIGITS),
        };

        let summary = format!(
            "{} {} = {} {}",
            units::format_display(output.value, DISPLAY_FRACTION_DIGITS),
            output.from,
            output.formatted,
            output.to
        );

        structured_result(summary, &output, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: UnitConvertParams = parse_arguments(arguments)?;
        info!("Unit convert tool (HTTP) called");
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UnitConvertParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<UnitConversionOutput>()),
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
                let params: UnitConvertParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// unit_categories
// ============================================================================

/// Parameters for the unit categories tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UnitCategoriesParams {
    /// Only return this category.
    #[serde(default)]
    pub category: Option<UnitCategory>,
}

/// Structured output listing categories.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct UnitCategoriesOutput {
    pub categories: Vec<CategoryDefaults>,
}

/// Unit categories tool.
pub struct UnitCategoriesTool;

impl UnitCategoriesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "unit_categories";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List unit categories with their units and the default from/to units and value.";

    #[instrument(skip_all)]
    pub fn execute(params: &UnitCategoriesParams) -> CallToolResult {
        info!("Unit categories tool called");

        let categories: Vec<CategoryDefaults> = match params.category {
            Some(category) => vec![on_category_changed(category)],
            None => UnitCategory::ALL.iter().map(|c| on_category_changed(*c)).collect(),
        };

        let summary = categories
            .iter()
            .map(|c| {
                let symbols: Vec<&str> = c.units.iter().map(|u| u.symbol).collect();
                format!(
                    "{} ({}): {} [default {} -> {}]",
                    c.name,
                    c.category,
                    symbols.join(", "),
                    c.default_from,
                    c.default_to
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        structured_result(summary, &UnitCategoriesOutput { categories }, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: UnitCategoriesParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UnitCategoriesParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<UnitCategoriesOutput>()),
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
                let params: UnitCategoriesParams =
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
    use super::super::super::common::first_text;
    use super::*;

    fn convert(value: f64, from: &str, to: &str, category: UnitCategory) -> CallToolResult {
        UnitConvertTool::execute(&UnitConvertParams {
            value,
            from: from.to_string(),
            to: to.to_string(),
            category,
        })
    }

    #[test]
    fn test_km_to_miles() {
        let result = convert(1.0, "km", "mi", UnitCategory::Length);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(first_text(&result), "1 km = 0.621371 mi");
    }

    #[test]
    fn test_fahrenheit_to_celsius() {
        let result = convert(212.0, "F", "c", UnitCategory::Temperature);
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["formatted"], "100");
        assert_eq!(structured["from"], "f");
    }

    #[test]
    fn test_unit_from_other_category() {
        let result = convert(1.0, "kg", "m", UnitCategory::Length);
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).contains("kg"));
    }

    #[test]
    fn test_overflowing_result_is_error() {
        let result = convert(1e308, "pb", "b", UnitCategory::Data);
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(first_text(&result), "Result overflows the f64 range");
        assert!(result.structured_content.is_none());
    }

    #[test]
    fn test_default_value_is_one() {
        let p: UnitConvertParams = serde_json::from_value(serde_json::json!({
            "from": "gb",
            "to": "mb",
            "category": "data"
        }))
        .unwrap();
        assert_eq!(p.value, 1.0);
        let result = UnitConvertTool::execute(&p);
        assert_eq!(result.structured_content.unwrap()["result"], 1024.0);
    }

    #[test]
    fn test_categories_all() {
        let result = UnitCategoriesTool::execute(&UnitCategoriesParams::default());
        let structured = result.structured_content.unwrap();
        let categories = structured["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(categories[0]["default_from"], "m");
        assert_eq!(categories[0]["default_to"], "km");
        assert_eq!(categories[3]["name"], "Digital Storage");
    }

    #[test]
    fn test_categories_single() {
        let result = UnitCategoriesTool::execute(&UnitCategoriesParams {
            category: Some(UnitCategory::Temperature),
        });
        assert!(first_text(&result).starts_with("Temperature (temperature): c, f, k"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler() {
        let result = UnitConvertTool::http_handler(serde_json::json!({
            "value": 16,
            "from": "oz",
            "to": "lb",
            "category": "weight"
        }))
        .unwrap();
        assert_eq!(result["isError"], false);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_unknown_category() {
        let result = UnitConvertTool::http_handler(serde_json::json!({
            "from": "m",
            "to": "km",
            "category": "volume"
        }));
        assert!(result.is_err());
    }
}
