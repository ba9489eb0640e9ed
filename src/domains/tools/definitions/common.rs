//! Helpers shared by every tool definition.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
#[cfg(feature = "http")]
use serde::de::DeserializeOwned;
use tracing::warn;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a result carrying a text summary plus structured content.
///
/// Falls back to text only if `data` cannot be serialized.
pub fn structured_result<T: Serialize>(summary: String, data: &T, is_error: bool) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(structured) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(structured),
            is_error: Some(is_error),
            meta: None,
        },
        Err(e) => {
            warn!("Failed to serialize structured content: {}", e);
            if is_error {
                CallToolResult::error(vec![Content::text(summary)])
            } else {
                CallToolResult::success(vec![Content::text(summary)])
            }
        }
    }
}

/// Deserialize HTTP tool arguments into a params struct.
#[cfg(feature = "http")]
pub fn parse_arguments<P: DeserializeOwned>(arguments: serde_json::Value) -> Result<P, String> {
    serde_json::from_value(arguments).map_err(|e| e.to_string())
}

/// Serialize the full CallToolResult, keeping `structuredContent`.
#[cfg(feature = "http")]
pub fn to_http_response(result: &CallToolResult) -> Result<serde_json::Value, String> {
    serde_json::to_value(result).map_err(|e| e.to_string())
}

/// First text block of a result.
#[cfg(test)]
pub fn first_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        answer: u32,
    }

    #[test]
    fn test_structured_result_sets_fields() {
        let result = structured_result("done".to_string(), &Sample { answer: 42 }, false);
        assert_eq!(result.is_error, Some(false));
        assert_eq!(first_text(&result), "done");
        assert_eq!(result.structured_content.unwrap()["answer"], 42);
    }

    #[test]
    fn test_error_result_flags_error() {
        let result = error_result("boom");
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(first_text(&result), "boom");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_response_keeps_structured_content() {
        let result = structured_result("ok".to_string(), &Sample { answer: 1 }, false);
        let value = to_http_response(&result).unwrap();
        assert_eq!(value["structuredContent"]["answer"], 1);
        assert_eq!(value["isError"], false);
    }
}
