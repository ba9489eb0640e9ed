//! JWT decoder tool.
//!
//! Splits a compact JWS into its three sections and decodes the header and
//! payload. The signature is reported verbatim and never verified.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::super::common::{error_result, structured_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};

/// URL-safe alphabet, padding optional.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Parameters for the JWT decoder tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JwtDecodeParams {
    /// Token in `header.payload.signature` form.
    pub token: String,
}

/// Registered time claims rendered as RFC 3339.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct TimeClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    /// Whether `exp` lies in the past.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

/// Decoded token sections. A section that fails to decode is `null`.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct DecodedJwt {
    pub header: Option<serde_json::Value>,
    pub payload: Option<serde_json::Value>,
    pub signature: String,
    pub claims: TimeClaims,
}

/// JWT decoder tool.
pub struct JwtDecodeTool;

impl JwtDecodeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "jwt_decode";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Decode the header and payload of a JSON Web Token. The signature is not verified.";

    #[instrument(skip_all)]
    pub fn execute(params: &JwtDecodeParams) -> CallToolResult {
        info!("JWT decode tool called");

        let decoded = match decode(params.token.trim(), Utc::now()) {
            Ok(d) => d,
            Err(message) => return error_result(&message),
        };

        let render = |section: &Option<serde_json::Value>| match section {
            Some(v) => serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
            None => "(could not decode)".to_string(),
        };
        let mut summary = format!(
            "Header:\n{}\n\nPayload:\n{}",
            render(&decoded.header),
            render(&decoded.payload)
        );
        if let Some(expires_at) = &decoded.claims.expires_at {
            let state = if decoded.claims.expired == Some(true) {
                "expired"
            } else {
                "valid"
            };
            summary.push_str(&format!("\n\nExpires: {} ({})", expires_at, state));
        }

        structured_result(summary, &decoded, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: JwtDecodeParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<JwtDecodeParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<DecodedJwt>()),
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
                let params: JwtDecodeParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

/// Decode `token`, evaluating expiry against `now`.
pub fn decode(token: &str, now: DateTime<Utc>) -> Result<DecodedJwt, String> {
    if token.is_empty() {
        return Err("Token is empty".to_string());
    }

    let parts: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = parts.as_slice() else {
        return Err(
            "Invalid JWT structure. Expected 3 parts (header.payload.signature).".to_string(),
        );
    };

    let header = decode_section(header);
    let payload = decode_section(payload);
    if header.is_none() && payload.is_none() {
        return Err("Failed to decode Base64 URL sections.".to_string());
    }

    let claims = payload
        .as_ref()
        .map(|p| time_claims(p, now))
        .unwrap_or_default();

    Ok(DecodedJwt {
        header,
        payload,
        signature: signature.to_string(),
        claims,
    })
}

fn decode_section(section: &str) -> Option<serde_json::Value> {
    let bytes = BASE64_URL
        .decode(section)
        .map_err(|e| debug!("Section is not base64url: {}", e))
        .ok()?;
    serde_json::from_slice(&bytes)
        .map_err(|e| debug!("Section is not JSON: {}", e))
        .ok()
}

fn timestamp(payload: &serde_json::Value, claim: &str) -> Option<DateTime<Utc>> {
    let seconds = payload.get(claim)?.as_f64()?;
    DateTime::from_timestamp(seconds.trunc() as i64, 0)
}

fn time_claims(payload: &serde_json::Value, now: DateTime<Utc>) -> TimeClaims {
    let exp = timestamp(payload, "exp");
    TimeClaims {
        issued_at: timestamp(payload, "iat").map(|t| t.to_rfc3339()),
        not_before: timestamp(payload, "nbf").map(|t| t.to_rfc3339()),
        expires_at: exp.map(|t| t.to_rfc3339()),
        expired: exp.map(|t| t <= now),
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::common::first_text;
    use super::*;

    // {"alg":"HS256","typ":"JWT"} . {"sub":"1234567890","name":"John Doe","iat":1516239022}
    const SAMPLE: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
        eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
        SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

    #[test]
    fn test_decode_sample() {
        let decoded = decode(SAMPLE, Utc::now()).unwrap();
        assert_eq!(decoded.header.unwrap()["alg"], "HS256");
        let payload = decoded.payload.unwrap();
        assert_eq!(payload["name"], "John Doe");
        assert_eq!(decoded.signature, "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c");
        assert_eq!(
            decoded.claims.issued_at.as_deref(),
            Some("2018-01-18T01:30:22+00:00")
        );
        assert!(decoded.claims.expired.is_none());
    }

    #[test]
    fn test_wrong_part_count() {
        let err = decode("a.b", Utc::now()).unwrap_err();
        assert!(err.contains("Expected 3 parts"));
        assert!(decode("a.b.c.d", Utc::now()).is_err());
    }

    #[test]
    fn test_undecodable_sections() {
        let err = decode("!!.??.sig", Utc::now()).unwrap_err();
        assert_eq!(err, "Failed to decode Base64 URL sections.");
    }

    #[test]
    fn test_one_bad_section_is_null() {
        let token = format!("not-json.{}", SAMPLE.split('.').nth(1).unwrap());
        let decoded = decode(&format!("{}.sig", token), Utc::now()).unwrap();
        assert!(decoded.header.is_none());
        assert!(decoded.payload.is_some());
    }

    #[test]
    fn test_expiry() {
        // {"exp":1000}
        let payload = BASE64_URL.encode(br#"{"exp":1000}"#);
        let token = format!("e30.{}.x", payload);
        let now = DateTime::from_timestamp(2000, 0).unwrap();
        let decoded = decode(&token, now).unwrap();
        assert_eq!(decoded.claims.expired, Some(true));

        let earlier = DateTime::from_timestamp(10, 0).unwrap();
        assert_eq!(decode(&token, earlier).unwrap().claims.expired, Some(false));
    }

    #[test]
    fn test_execute_summary() {
        let result = JwtDecodeTool::execute(&JwtDecodeParams {
            token: SAMPLE.to_string(),
        });
        assert!(first_text(&result).contains("\"name\": \"John Doe\""));
    }
}
