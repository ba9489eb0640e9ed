//! Text encoder/decoder tool: Base64, URL component and HTML entities.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose};
use futures::FutureExt;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument};

use super::super::common::{error_result, success_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};

/// Standard alphabet, padding optional on decode.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encoding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CodecMode {
    Base64,
    /// URI component encoding.
    Url,
    /// Numeric HTML entities.
    Html,
}

/// Direction of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CodecAction {
    Encode,
    Decode,
}

impl fmt::Display for CodecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CodecMode::Base64 => "base64",
            CodecMode::Url => "url",
            CodecMode::Html => "html",
        })
    }
}

impl fmt::Display for CodecAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CodecAction::Encode => "encode",
            CodecAction::Decode => "decode",
        })
    }
}

/// Parameters for the text codec tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TextCodecParams {
    /// Input text.
    pub text: String,

    /// Scheme: base64, url or html.
    pub mode: CodecMode,

    /// encode or decode.
    pub action: CodecAction,
}

/// Text codec tool.
pub struct TextCodecTool;

impl TextCodecTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "text_codec";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Encode or decode text as Base64, URL component (percent-encoding) or HTML entities.";

    #[instrument(skip_all, fields(mode = %params.mode, action = %params.action))]
    pub fn execute(params: &TextCodecParams) -> CallToolResult {
        info!("Text codec tool called");

        match convert(&params.text, params.mode, params.action) {
            Ok(output) => success_result(output),
            Err(e) => error_result(&format!("Conversion failed: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: TextCodecParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<TextCodecParams>(),
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
                let params: TextCodecParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

/// Run one conversion.
pub fn convert(text: &str, mode: CodecMode, action: CodecAction) -> Result<String, String> {
    match (mode, action) {
        (CodecMode::Base64, CodecAction::Encode) => Ok(general_purpose::STANDARD.encode(text)),
        (CodecMode::Base64, CodecAction::Decode) => base64_decode(text),
        (CodecMode::Url, CodecAction::Encode) => Ok(url_encode(text)),
        (CodecMode::Url, CodecAction::Decode) => url_decode(text),
        (CodecMode::Html, CodecAction::Encode) => Ok(html_encode(text)),
        (CodecMode::Html, CodecAction::Decode) => Ok(html_decode(text)),
    }
}

// ============================================================================
// Base64
// ============================================================================

fn base64_decode(text: &str) -> Result<String, String> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = LENIENT_BASE64
        .decode(compact)
        .map_err(|e| format!("Base64: {}", e))?;
    String::from_utf8(bytes).map_err(|_| "Base64: decoded bytes are not valid UTF-8".to_string())
}

// ============================================================================
// URL component
// ============================================================================

/// Bytes `encodeURIComponent` escapes: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn url_encode(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

fn url_decode(text: &str) -> Result<String, String> {
    // percent_decode_str passes malformed escapes through; reject them first
    let bytes = text.as_bytes();
    if let Some((position, _)) = text.match_indices('%').find(|(i, _)| {
        !bytes
            .get(i + 1..i + 3)
            .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit))
    }) {
        return Err(format!("URL: malformed escape at position {}", position));
    }

    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| "URL: escapes do not form valid UTF-8".to_string())
}

// ============================================================================
// HTML entities
// ============================================================================

fn html_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '<' | '>' | '&' | '\u{A0}'..='\u{9999}') {
            out.push_str(&format!("&#{};", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => None,
    }
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok()?
            }
            None if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => {
                num.parse::<u32>().ok()?
            }
            _ => return None,
        };
        return char::from_u32(code);
    }
    named_entity(body)
}

/// Longest entity body we try to interpret (`&#x10FFFF;` fits).
const MAX_ENTITY_LEN: usize = 10;

fn html_decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let decoded = tail
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&tail[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::super::super::common::first_text;
    use super::*;

    #[test]
    fn test_base64() {
        assert_eq!(
            convert("hello", CodecMode::Base64, CodecAction::Encode).unwrap(),
            "aGVsbG8="
        );
        assert_eq!(
            convert("aGVsbG8=", CodecMode::Base64, CodecAction::Decode).unwrap(),
            "hello"
        );
        assert_eq!(
            convert("aGVsbG8", CodecMode::Base64, CodecAction::Decode).unwrap(),
            "hello"
        );
        assert_eq!(
            convert("héllo", CodecMode::Base64, CodecAction::Encode).unwrap(),
            "aMOpbGxv"
        );
    }

    #[test]
    fn test_base64_invalid() {
        assert!(convert("***", CodecMode::Base64, CodecAction::Decode).is_err());
        // 0xFF is not valid UTF-8
        assert!(convert("/w==", CodecMode::Base64, CodecAction::Decode).is_err());
    }

    #[test]
    fn test_url_component() {
        assert_eq!(url_encode("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(url_encode("keep-_.!~*'()"), "keep-_.!~*'()");
        assert_eq!(url_decode("a%20b%26c%3Dd%2F%C3%A9").unwrap(), "a b&c=d/é");
        assert_eq!(url_decode("100%").unwrap_err(), "URL: malformed escape at position 3");
        assert!(url_decode("%C3").is_err());
    }

    #[test]
    fn test_url_decode_rejects_signed_and_truncated_escapes() {
        assert_eq!(url_decode("%+4").unwrap_err(), "URL: malformed escape at position 0");
        assert_eq!(url_decode("ab%2").unwrap_err(), "URL: malformed escape at position 2");
        assert_eq!(url_decode("%-1%41").unwrap_err(), "URL: malformed escape at position 0");
        assert_eq!(url_decode("%41%4a").unwrap(), "AJ");
    }

    #[test]
    fn test_html_encode() {
        assert_eq!(html_encode("<a & b>"), "&#60;a &#38; b&#62;");
        assert_eq!(html_encode("café"), "caf&#233;");
        assert_eq!(html_encode("plain \"quotes\""), "plain \"quotes\"");
    }

    #[test]
    fn test_html_decode() {
        assert_eq!(html_decode("&#60;a &amp; b&gt;"), "<a & b>");
        assert_eq!(html_decode("&#x41;&#X42;"), "AB");
        assert_eq!(html_decode("&unknown; & done"), "&unknown; & done");
        assert_eq!(html_decode("caf&#233;"), "café");
    }

    #[test]
    fn test_html_decode_keeps_signed_entities() {
        assert_eq!(html_decode("&#+65;"), "&#+65;");
        assert_eq!(html_decode("&#x+41;"), "&#x+41;");
        assert_eq!(html_decode("&#;&#x;"), "&#;&#x;");
        assert_eq!(html_decode("&#65;"), "A");
    }

    #[test]
    fn test_execute_error() {
        let result = TextCodecTool::execute(&TextCodecParams {
            text: "%zz".to_string(),
            mode: CodecMode::Url,
            action: CodecAction::Decode,
        });
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).starts_with("Conversion failed"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler() {
        let result = TextCodecTool::http_handler(serde_json::json!({
            "text": "x",
            "mode": "base64",
            "action": "encode"
        }))
        .unwrap();
        assert_eq!(result["isError"], false);
    }
}
