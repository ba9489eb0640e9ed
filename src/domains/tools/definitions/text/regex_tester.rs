//! Regex tester tool: run a pattern against a test string and list matches.

use std::collections::BTreeMap;
use std::str::FromStr;

use futures::FutureExt;
use regex::{Regex, RegexBuilder};
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

/// Upper bound on reported matches.
pub const MAX_MATCHES: usize = 1000;

/// Parsed flag string (`g`, `i`, `m`, `s`, `u`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
}

impl FromStr for RegexFlags {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::default();
        for c in s.chars() {
            let slot = match c {
                'g' => &mut flags.global,
                'i' => &mut flags.case_insensitive,
                'm' => &mut flags.multi_line,
                's' => &mut flags.dot_all,
                // patterns are always Unicode-aware
                'u' => continue,
                _ => return Err(format!("Invalid flag '{c}': supported flags are g, i, m, s, u")),
            };
            if *slot {
                return Err(format!("Duplicate flag '{c}'"));
            }
            *slot = true;
        }
        Ok(flags)
    }
}

impl RegexFlags {
    /// Compile `pattern` with these flags.
    pub fn compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_all)
            .build()
    }
}

/// Parameters for the regex tester tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RegexTestParams {
    /// Regular expression. An empty pattern yields no matches.
    pub pattern: String,

    /// Flags: g (all matches), i (ignore case), m (multi-line), s (dot matches newline), u.
    #[serde(default = "default_flags")]
    pub flags: String,

    /// Text to search.
    pub text: String,
}

fn default_flags() -> String {
    "gm".to_string()
}

/// One match with its capture groups.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RegexMatch {
    #[serde(rename = "match")]
    pub matched: String,
    /// Character offset of the match start.
    pub index: usize,
    /// Numbered groups, starting at group 1; `null` when a group did not take part.
    pub groups: Vec<Option<String>>,
    /// Named groups.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub named: BTreeMap<String, Option<String>>,
}

/// Structured output of the regex tester.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct RegexTestOutput {
    pub matches: Vec<RegexMatch>,
    /// True when more than `MAX_MATCHES` matches were found.
    pub truncated: bool,
}

/// Regex tester tool.
pub struct RegexTestTool;

impl RegexTestTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "regex_test";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Test a regular expression against a string. Returns each match with its \
         character index and capture groups. Without the g flag only the first match is returned.";

    #[instrument(skip_all, fields(flags = %params.flags))]
    pub fn execute(params: &RegexTestParams) -> CallToolResult {
        info!("Regex test tool called with pattern of {} chars", params.pattern.len());

        let flags = match params.flags.parse::<RegexFlags>() {
            Ok(f) => f,
            Err(e) => return error_result(&e),
        };

        let output = if params.pattern.is_empty() {
            RegexTestOutput {
                matches: Vec::new(),
                truncated: false,
            }
        } else {
            let regex = match flags.compile(&params.pattern) {
                Ok(r) => r,
                Err(e) => return error_result(&format!("Invalid pattern: {}", e)),
            };
            find_matches(&regex, &params.text, flags.global)
        };

        structured_result(summarize(&output), &output, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: RegexTestParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<RegexTestParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<RegexTestOutput>()),
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
                let params: RegexTestParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

/// Collect matches of `regex` in `text`; only the first unless `global`.
pub fn find_matches(regex: &Regex, text: &str, global: bool) -> RegexTestOutput {
    let limit = if global { MAX_MATCHES } else { 1 };
    let names: Vec<Option<&str>> = regex.capture_names().collect();

    let mut matches = Vec::new();
    let mut truncated = false;
    // byte offset -> char offset, advanced monotonically
    let (mut byte_pos, mut char_pos) = (0, 0);

    for caps in regex.captures_iter(text) {
        if matches.len() == limit {
            truncated = global;
            break;
        }
        let Some(whole) = caps.get(0) else { continue };

        char_pos += text[byte_pos..whole.start()].chars().count();
        byte_pos = whole.start();

        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|m| m.as_str().to_string()))
            .collect();
        let named = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                name.map(|n| (n.to_string(), caps.get(i).map(|m| m.as_str().to_string())))
            })
            .collect();

        matches.push(RegexMatch {
            matched: whole.as_str().to_string(),
            index: char_pos,
            groups,
            named,
        });
    }

    RegexTestOutput { matches, truncated }
}

fn summarize(output: &RegexTestOutput) -> String {
    if output.matches.is_empty() {
        return "No matches found".to_string();
    }

    let mut lines: Vec<String> = output
        .matches
        .iter()
        .enumerate()
        .map(|(i, m)| format!("Match {}: \"{}\" (Index: {})", i + 1, m.matched, m.index))
        .collect();
    if output.truncated {
        lines.push(format!("Stopped after {} matches", MAX_MATCHES));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::super::super::common::first_text;
    use super::*;

    fn run(pattern: &str, flags: &str, text: &str) -> CallToolResult {
        RegexTestTool::execute(&RegexTestParams {
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_default_example() {
        let result = run("[a-z]+", "gm", "Hello world, this is a test string.");
        let text = first_text(&result);
        assert!(text.starts_with("Match 1: \"ello\" (Index: 1)"));
        assert!(text.contains("Match 2: \"world\" (Index: 6)"));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["matches"].as_array().unwrap().len(), 7);
        assert_eq!(structured["truncated"], false);
    }

    #[test]
    fn test_groups_and_named_groups() {
        let result = run(r"(?P<key>\w+)=(\d+)?", "g", "a=1 b=");
        let structured = result.structured_content.unwrap();
        let matches = structured["matches"].as_array().unwrap();
        assert_eq!(matches[0]["match"], "a=1");
        assert_eq!(matches[0]["groups"][0], "a");
        assert_eq!(matches[0]["groups"][1], "1");
        assert_eq!(matches[0]["named"]["key"], "a");
        assert!(matches[1]["groups"][1].is_null());
    }

    #[test]
    fn test_without_global_flag_returns_first() {
        let result = run(r"\d", "", "1 2 3");
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["matches"].as_array().unwrap().len(), 1);
        assert_eq!(structured["truncated"], false);
    }

    #[test]
    fn test_index_counts_characters() {
        let result = run("b", "g", "ééb");
        assert_eq!(result.structured_content.unwrap()["matches"][0]["index"], 2);
    }

    #[test]
    fn test_flags() {
        assert_eq!(
            "gims".parse::<RegexFlags>().unwrap(),
            RegexFlags {
                global: true,
                case_insensitive: true,
                multi_line: true,
                dot_all: true,
            }
        );
        assert!("gg".parse::<RegexFlags>().is_err());
        assert!("y".parse::<RegexFlags>().is_err());

        let result = run("HELLO", "i", "hello");
        assert_eq!(first_text(&result), "Match 1: \"hello\" (Index: 0)");
    }

    #[test]
    fn test_errors() {
        let result = run("(", "g", "x");
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).starts_with("Invalid pattern"));

        let result = run("x", "q", "x");
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_empty_pattern_has_no_matches() {
        let result = run("", "g", "anything");
        assert_eq!(first_text(&result), "No matches found");
    }

    #[test]
    fn test_match_limit() {
        let text = "a".repeat(MAX_MATCHES + 5);
        let output = find_matches(&Regex::new("a").unwrap(), &text, true);
        assert_eq!(output.matches.len(), MAX_MATCHES);
        assert!(output.truncated);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_default_flags() {
        let result =
            RegexTestTool::http_handler(serde_json::json!({ "pattern": "^b", "text": "a\nb" }))
                .unwrap();
        assert_eq!(result["structuredContent"]["matches"][0]["index"], 2);
    }
}
