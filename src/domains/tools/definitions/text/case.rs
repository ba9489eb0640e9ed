//! Text case converter tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument};

use super::super::common::success_result;
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};

/// Target casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    Upper,
    Lower,
    Camel,
    Pascal,
    Snake,
    Kebab,
    Title,
}

impl fmt::Display for TextCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextCase::Upper => "upper",
            TextCase::Lower => "lower",
            TextCase::Camel => "camel",
            TextCase::Pascal => "pascal",
            TextCase::Snake => "snake",
            TextCase::Kebab => "kebab",
            TextCase::Title => "title",
        };
        f.write_str(name)
    }
}

/// Parameters for the text case tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TextCaseParams {
    /// Text to transform.
    pub text: String,

    /// Target case: upper, lower, camel, pascal, snake, kebab or title.
    pub case: TextCase,
}

/// Text case tool.
pub struct TextCaseTool;

impl TextCaseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "text_case";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Convert text to UPPER, lower, camelCase, PascalCase, snake_case, kebab-case or Title Case.";

    #[instrument(skip_all, fields(case = %params.case))]
    pub fn execute(params: &TextCaseParams) -> CallToolResult {
        info!("Text case tool called with {} chars", params.text.chars().count());
        success_result(transform(&params.text, params.case))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: TextCaseParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TextCaseParams>(),
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
                let params: TextCaseParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Transformations
// ============================================================================

/// Apply `case` to `text`.
pub fn transform(text: &str, case: TextCase) -> String {
    match case {
        TextCase::Upper => text.to_uppercase(),
        TextCase::Lower => text.to_lowercase(),
        TextCase::Camel => capitalize_word_starts(text, true),
        TextCase::Pascal => capitalize_word_starts(text, false),
        TextCase::Snake => join_words(text, "_"),
        TextCase::Kebab => join_words(text, "-"),
        TextCase::Title => title_case(text),
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Upper-case every word start, optionally lower-casing the very first
/// character, then drop whitespace.
fn capitalize_word_starts(text: &str, lower_first: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        let word_start = is_word(c) && !prev.is_some_and(is_word);
        prev = Some(c);

        if c.is_whitespace() {
            continue;
        }
        if i == 0 && lower_first && (word_start || c.is_ascii_uppercase()) {
            out.push(c.to_ascii_lowercase());
        } else if word_start {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Split into words (acronym runs, capitalised words, single capitals,
/// digit runs), lower-case them and join. Text without any word is
/// returned unchanged.
fn join_words(text: &str, separator: &str) -> String {
    let words = split_words(text);
    if words.is_empty() {
        return text.to_string();
    }
    words
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn split_words(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let at = |i: usize| bytes.get(i).copied();
    let upper = |i: usize| at(i).is_some_and(|b| b.is_ascii_uppercase());
    let lower = |i: usize| at(i).is_some_and(|b| b.is_ascii_lowercase());
    let digit = |i: usize| at(i).is_some_and(|b| b.is_ascii_digit());
    let word_byte = |i: usize| at(i).is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_');
    let run = |mut i: usize, pred: &dyn Fn(usize) -> bool| {
        while pred(i) {
            i += 1;
        }
        i
    };

    let mut words = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        // Acronym: two or more capitals ending at a word boundary or
        // right before a capitalised word ("HTTPServer" -> "HTTP").
        let caps_end = run(i, &upper);
        let caps = caps_end - i;
        if caps >= 2 && !word_byte(caps_end) {
            words.push(&text[i..caps_end]);
            i = caps_end;
            continue;
        }
        if caps >= 3 && lower(caps_end) {
            words.push(&text[i..caps_end - 1]);
            i = caps_end - 1;
            continue;
        }

        // Optional capital, lower-case run, trailing digits.
        let start = i;
        let mut j = i;
        if upper(j) && lower(j + 1) {
            j += 1;
        }
        if lower(j) {
            j = run(run(j, &lower), &digit);
            words.push(&text[start..j]);
            i = j;
            continue;
        }

        if upper(i) {
            words.push(&text[i..i + 1]);
            i += 1;
            continue;
        }
        if digit(i) {
            let end = run(i, &digit);
            words.push(&text[i..end]);
            i = end;
            continue;
        }

        // Skip one full character (may be multi-byte).
        i += text[i..].chars().next().map_or(1, char::len_utf8);
    }
    words
}

/// Capitalise the first character of every word and lower-case the rest
/// of it. A word starts at a word character and runs to the next space.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_whitespace() {
            in_word = false;
            out.push(c);
        } else if in_word {
            out.extend(c.to_lowercase());
        } else if is_word(c) {
            in_word = true;
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::super::common::first_text;
    use super::*;

    #[test]
    fn test_camel_and_pascal() {
        assert_eq!(transform("hello world", TextCase::Camel), "helloWorld");
        assert_eq!(transform("Hello big world", TextCase::Camel), "helloBigWorld");
        assert_eq!(transform("hello world", TextCase::Pascal), "HelloWorld");
        assert_eq!(transform("user-id value", TextCase::Pascal), "User-IdValue");
    }

    #[test]
    fn test_snake_and_kebab() {
        assert_eq!(transform("helloWorld", TextCase::Snake), "hello_world");
        assert_eq!(transform("HTTPServer error", TextCase::Snake), "http_server_error");
        assert_eq!(transform("parse JSON", TextCase::Kebab), "parse-json");
        assert_eq!(transform("version2 Update", TextCase::Kebab), "version2-update");
        assert_eq!(transform("area 51", TextCase::Snake), "area_51");
    }

    #[test]
    fn test_snake_without_words_returns_input() {
        assert_eq!(transform("!!! ???", TextCase::Snake), "!!! ???");
        assert_eq!(transform("", TextCase::Kebab), "");
    }

    #[test]
    fn test_title() {
        assert_eq!(transform("hELLO wORLD", TextCase::Title), "Hello World");
        assert_eq!(transform("(quoted) text", TextCase::Title), "(Quoted) Text");
    }

    #[test]
    fn test_upper_lower() {
        assert_eq!(transform("MiXeD", TextCase::Upper), "MIXED");
        assert_eq!(transform("MiXeD", TextCase::Lower), "mixed");
    }

    #[test]
    fn test_execute() {
        let result = TextCaseTool::execute(&TextCaseParams {
            text: "some value".to_string(),
            case: TextCase::Snake,
        });
        assert_eq!(first_text(&result), "some_value");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_rejects_unknown_case() {
        let result =
            TextCaseTool::http_handler(serde_json::json!({ "text": "x", "case": "sponge" }));
        assert!(result.is_err());
    }
}
