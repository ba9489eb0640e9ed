//! Hash generator tool (SHA-1 and the SHA-2 family).

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use tracing::{info, instrument};

use super::super::common::structured_result;
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};

/// Parameters for the hash tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HashTextParams {
    /// Text to hash (UTF-8 bytes are hashed).
    pub text: String,
}

/// Lower-case hex digests of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Digests {
    #[serde(rename = "SHA-1")]
    pub sha1: String,
    #[serde(rename = "SHA-256")]
    pub sha256: String,
    #[serde(rename = "SHA-384")]
    pub sha384: String,
    #[serde(rename = "SHA-512")]
    pub sha512: String,
}

impl Digests {
    pub fn of(data: &[u8]) -> Self {
        Self {
            sha1: hex_digest::<Sha1>(data),
            sha256: hex_digest::<Sha256>(data),
            sha384: hex_digest::<Sha384>(data),
            sha512: hex_digest::<Sha512>(data),
        }
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    let mut hasher = D::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Structured output; `hashes` is absent for empty input.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct HashOutput {
    pub hashes: Option<Digests>,
}

/// Hash generator tool.
pub struct HashTextTool;

impl HashTextTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hash_text";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Compute SHA-1, SHA-256, SHA-384 and SHA-512 hex digests of a text. Empty text yields no hashes.";

    #[instrument(skip_all)]
    pub fn execute(params: &HashTextParams) -> CallToolResult {
        info!("Hash tool called with {} bytes", params.text.len());

        if params.text.is_empty() {
            return structured_result(
                "No input to hash".to_string(),
                &HashOutput { hashes: None },
                false,
            );
        }

        let digests = Digests::of(params.text.as_bytes());
        let summary = format!(
            "SHA-1:   {}\nSHA-256: {}\nSHA-384: {}\nSHA-512: {}",
            digests.sha1, digests.sha256, digests.sha384, digests.sha512
        );
        structured_result(summary, &HashOutput { hashes: Some(digests) }, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, String> {
        let params: HashTextParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<HashTextParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<HashOutput>()),
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
                let params: HashTextParams =
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

    #[test]
    fn test_known_digests() {
        let d = Digests::of(b"abc");
        assert_eq!(d.sha1, "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(
            d.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(d.sha384.len(), 96);
        assert!(d.sha512.starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn test_empty_input_has_no_hashes() {
        let result = HashTextTool::execute(&HashTextParams {
            text: String::new(),
        });
        assert_eq!(result.is_error, Some(false));
        assert!(result.structured_content.unwrap()["hashes"].is_null());
    }

    #[test]
    fn test_structured_keys() {
        let result = HashTextTool::execute(&HashTextParams {
            text: "abc".to_string(),
        });
        let structured = result.structured_content.unwrap();
        assert_eq!(
            structured["hashes"]["SHA-1"],
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }
}
