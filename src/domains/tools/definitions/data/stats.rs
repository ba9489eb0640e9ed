//! Statistical calculator tool.

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
use crate::domains::numeric::stats::{format_display, on_sample_text_changed};
use crate::domains::numeric::{Delimiter, StatisticsResult};

/// Parameters for the statistics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StatisticsParams {
    /// Numbers separated by the delimiter. Non-numeric tokens are ignored.
    pub data: String,

    /// Separator between numbers: comma, space, newline or semicolon.
    #[serde(default)]
    pub delimiter: Delimiter,
}

/// Structured output of the statistics tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StatisticsOutput {
    pub delimiter: Delimiter,
    /// Absent when no number could be parsed.
    pub statistics: Option<StatisticsResult>,
}

/// Statistics tool - descriptive statistics for a list of numbers.
pub struct StatisticsTool;

impl StatisticsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "statistics";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Calculate count, sum, mean, median, mode, min, max, range, variance and \
         population/sample standard deviation for a delimited list of numbers.";

    /// Execute the tool logic (for STDIO/TCP transport via rmcp).
    #[instrument(skip_all, fields(delimiter = %params.delimiter))]
    pub fn execute(params: &StatisticsParams) -> CallToolResult {
        info!("Statistics tool called with {} bytes of data", params.data.len());

        let statistics = on_sample_text_changed(&params.data, params.delimiter);
        if statistics.as_ref().is_some_and(|s| !s.is_finite()) {
            return error_result("Values are too large: statistics overflow the f64 range");
        }
        let summary = match &statistics {
            Some(s) => render(s),
            None => "No numeric values found".to_string(),
        };

        let output = StatisticsOutput {
            delimiter: params.delimiter,
            statistics,
        };
        structured_result(summary, &output, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: StatisticsParams = parse_arguments(arguments)?;
        info!("Statistics tool (HTTP) called");
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<StatisticsParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<StatisticsOutput>()),
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
                let params: StatisticsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

fn render(s: &StatisticsResult) -> String {
    let rows = [
        ("Count", s.count.to_string()),
        ("Sum", format_display(s.sum)),
        ("Mean", format_display(s.mean)),
        ("Median", format_display(s.median)),
        ("Mode", s.mode.to_string()),
        ("Min", format_display(s.min)),
        ("Max", format_display(s.max)),
        ("Range", format_display(s.range)),
        ("Variance", format_display(s.variance)),
        ("Std Dev (population)", format_display(s.std_dev_population)),
        ("Std Dev (sample)", format_display(s.std_dev_sample)),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<21} {}", format!("{}:", label), value))
        .collect::<Vec<_>>()
        .join("\n")
}
