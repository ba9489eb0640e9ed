//! Lorem ipsum generator tool.
//!
//! Output is deterministic: words, sentences and paragraphs are taken from
//! fixed passages in order, wrapping around when the count exceeds them.

use std::fmt;
use std::sync::LazyLock;

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

/// Accepted range for `count`.
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 100;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum. Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo. Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, sed quia consequuntur magni dolores eos qui ratione voluptatem sequi nesciunt. Neque porro quisquam est, qui dolorem ipsum quia dolor sit amet, consectetur, adipisci velit, sed quia non numquam eius modi tempora incidunt ut labore et dolore magnam aliquam quaerat voluptatem. Ut enim ad minima veniam, quis nostrum exercitationem ullam corporis suscipit laboriosam, nisi ut aliquid ex ea commodi consequatur? Quis autem vel eum iure reprehenderit qui in ea voluptate velit esse quam nihil molestiae consequatur, vel illum qui dolorem eum fugiat quo voluptas nulla pariatur?";

const AT_VERO: &str = "At vero eos et accusamus et iusto odio dignissimos ducimus qui blanditiis praesentium voluptatum deleniti atque corrupti quos dolores et quas molestias excepturi sint occaecati cupiditate non provident, similique sunt in culpa qui officia deserunt mollitia animi, id est laborum et dolorum fuga. Et harum quidem rerum facilis est et expedita distinctio. Nam libero tempore, cum soluta nobis est eligendi optio cumque nihil impedit quo minus id quod maxime placeat facere possimus, omnis voluptas assumenda est, omnis dolor repellendus. Temporibus autem quibusdam et aut officiis debitis aut rerum necessitatibus saepe eveniet ut et voluptates repudiandae sint et molestiae non recusandae. Itaque earum rerum hic tenetur a sapiente delectus, ut aut reiciendis voluptatibus maiores alias consequatur aut perferendis doloribus asperiores repellat.";

const SED_UT: &str = "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium, totam rem aperiam, eaque ipsa quae ab illo inventore veritatis et quasi architecto beatae vitae dicta sunt explicabo. Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut fugit, sed quia consequuntur magni dolores eos qui ratione voluptatem sequi nesciunt. Neque porro quisquam est, qui dolorem ipsum quia dolor sit amet, consectetur, adipisci velit, sed quia non numquam eius modi tempora incidunt ut labore et dolore magnam aliquam quaerat voluptatem.";

const PARAGRAPHS: [&str; 3] = [LOREM, AT_VERO, SED_UT];

/// Lower-cased words of the first passage, punctuation removed.
static WORDS: LazyLock<Vec<String>> = LazyLock::new(|| {
    LOREM
        .split(' ')
        .map(|w| w.replace(['.', ',', '?'], "").to_lowercase())
        .collect()
});

/// Sentences of the first passage, each ending in punctuation.
static SENTENCES: LazyLock<Vec<String>> = LazyLock::new(|| {
    LOREM
        .split(". ")
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.ends_with(['.', '?']) {
                s.to_string()
            } else {
                format!("{s}.")
            }
        })
        .collect()
});

/// What `count` counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoremUnit {
    #[default]
    Paragraphs,
    Sentences,
    Words,
}

impl fmt::Display for LoremUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoremUnit::Paragraphs => "paragraphs",
            LoremUnit::Sentences => "sentences",
            LoremUnit::Words => "words",
        })
    }
}

/// Parameters for the lorem ipsum tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LoremIpsumParams {
    /// How many units to generate (1-100). Defaults to 3.
    #[serde(default = "default_count")]
    pub count: usize,

    /// paragraphs (default), sentences or words.
    #[serde(default)]
    pub unit: LoremUnit,
}

fn default_count() -> usize {
    3
}

/// Structured output of the lorem ipsum tool.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct LoremIpsumOutput {
    pub unit: LoremUnit,
    pub count: usize,
    pub text: String,
}

/// Lorem ipsum tool.
pub struct LoremIpsumTool;

impl LoremIpsumTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "lorem_ipsum";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Generate placeholder text: 1-100 paragraphs, sentences or words of lorem ipsum.";

    #[instrument(skip_all, fields(unit = %params.unit, count = params.count))]
    pub fn execute(params: &LoremIpsumParams) -> CallToolResult {
        info!("Lorem ipsum tool called");

        if !(MIN_COUNT..=MAX_COUNT).contains(&params.count) {
            return error_result(&format!(
                "Count must be between {} and {}, got {}",
                MIN_COUNT, MAX_COUNT, params.count
            ));
        }

        let output = LoremIpsumOutput {
            unit: params.unit,
            count: params.count,
            text: generate(params.unit, params.count),
        };
        structured_result(output.text.clone(), &output, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: LoremIpsumParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<LoremIpsumParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<LoremIpsumOutput>()),
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
                let params: LoremIpsumParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

/// Generate `count` units of placeholder text.
pub fn generate(unit: LoremUnit, count: usize) -> String {
    match unit {
        LoremUnit::Words => cycle(WORDS.as_slice(), count).join(" "),
        LoremUnit::Sentences => cycle(SENTENCES.as_slice(), count).join(" "),
        LoremUnit::Paragraphs => cycle(PARAGRAPHS.as_slice(), count).join("\n\n"),
    }
}

fn cycle<T: AsRef<str>>(items: &[T], count: usize) -> Vec<&str> {
    items.iter().map(|item| item.as_ref()).cycle().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::super::super::common::first_text;
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(generate(LoremUnit::Words, 5), "lorem ipsum dolor sit amet");
        let many = generate(LoremUnit::Words, WORDS.len() + 1);
        assert!(many.ends_with("pariatur lorem"));
    }

    #[test]
    fn test_sentences_end_with_punctuation() {
        assert_eq!(
            generate(LoremUnit::Sentences, 2),
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
             Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua."
        );
        assert!(SENTENCES.iter().all(|s| s.ends_with(['.', '?'])));
        assert!(!SENTENCES.iter().any(|s| s.ends_with("?.")));
    }

    #[test]
    fn test_paragraphs_wrap_around() {
        let text = generate(LoremUnit::Paragraphs, 4);
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 4);
        assert!(paragraphs[1].starts_with("At vero"));
        assert_eq!(paragraphs[3], paragraphs[0]);
    }

    #[test]
    fn test_defaults() {
        let p: LoremIpsumParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.count, 3);
        assert_eq!(p.unit, LoremUnit::Paragraphs);
    }

    #[test]
    fn test_count_bounds() {
        let result = LoremIpsumTool::execute(&LoremIpsumParams {
            count: 0,
            unit: LoremUnit::Words,
        });
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(first_text(&result), "Count must be between 1 and 100, got 0");

        let result = LoremIpsumTool::execute(&LoremIpsumParams {
            count: 101,
            unit: LoremUnit::Words,
        });
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_structured_output() {
        let result = LoremIpsumTool::execute(&LoremIpsumParams {
            count: 2,
            unit: LoremUnit::Words,
        });
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["text"], "lorem ipsum");
        assert_eq!(structured["unit"], "words");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler() {
        let result = LoremIpsumTool::http_handler(serde_json::json!({ "count": 1, "unit": "sentences" }))
            .unwrap();
        assert_eq!(result["isError"], false);
    }
}
