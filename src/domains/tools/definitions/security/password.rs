//! Password generator tool.

use futures::FutureExt;
use rand::Rng;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{error_result, structured_result};
#[cfg(feature = "http")]
use super::super::common::{parse_arguments, to_http_response};
use crate::core::config::Config;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

/// Shortest password accepted.
pub const MIN_LENGTH: usize = 4;

/// Parameters for the password generator tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PasswordGenerateParams {
    /// Password length (default 16).
    #[serde(default = "default_length")]
    pub length: usize,

    #[serde(default = "enabled")]
    pub uppercase: bool,

    #[serde(default = "enabled")]
    pub lowercase: bool,

    #[serde(default = "enabled")]
    pub numbers: bool,

    #[serde(default = "enabled")]
    pub symbols: bool,
}

fn default_length() -> usize {
    16
}

fn enabled() -> bool {
    true
}

impl PasswordGenerateParams {
    fn charset(&self) -> Vec<char> {
        [
            (self.lowercase, LOWERCASE),
            (self.uppercase, UPPERCASE),
            (self.numbers, DIGITS),
            (self.symbols, SYMBOLS),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .flat_map(|(_, set)| set.chars())
        .collect()
    }

    fn enabled_sets(&self) -> usize {
        [self.uppercase, self.lowercase, self.numbers, self.symbols]
            .iter()
            .filter(|on| **on)
            .count()
    }
}

/// Coarse strength label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

/// One point per length threshold passed and per character set enabled.
pub fn strength(length: usize, enabled_sets: usize) -> Strength {
    let score = usize::from(length > 8) + usize::from(length > 12) + enabled_sets;
    match score {
        0..=2 => Strength::Weak,
        3..=4 => Strength::Medium,
        _ => Strength::Strong,
    }
}

/// Structured output of the password generator.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct GeneratedPassword {
    /// Empty when no character set is enabled.
    pub password: String,
    pub strength: Strength,
}

/// Password generator tool.
pub struct PasswordGenerateTool;

impl PasswordGenerateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "password_generate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate a random password from the selected character sets and rate its strength.";

    #[instrument(skip_all, fields(length = params.length))]
    pub fn execute(params: &PasswordGenerateParams, config: &Config) -> CallToolResult {
        let max = config.tools.max_password_length;
        if params.length < MIN_LENGTH || params.length > max {
            return error_result(&format!(
                "Length must be between {} and {}",
                MIN_LENGTH, max
            ));
        }

        let charset = params.charset();
        let mut rng = rand::thread_rng();
        let password: String = if charset.is_empty() {
            String::new()
        } else {
            (0..params.length)
                .map(|_| charset[rng.gen_range(0..charset.len())])
                .collect()
        };

        let output = GeneratedPassword {
            password,
            strength: strength(params.length, params.enabled_sets()),
        };
        info!("Generated password with strength {:?}", output.strength);

        let summary = if output.password.is_empty() {
            "No character set selected".to_string()
        } else {
            format!("{}\nStrength: {:?}", output.password, output.strength)
        };
        structured_result(summary, &output, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: PasswordGenerateParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params, &config))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PasswordGenerateParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<GeneratedPassword>()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: PasswordGenerateParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(length: usize, sets: [bool; 4]) -> PasswordGenerateParams {
        let [uppercase, lowercase, numbers, symbols] = sets;
        PasswordGenerateParams {
            length,
            uppercase,
            lowercase,
            numbers,
            symbols,
        }
    }

    fn generate(p: &PasswordGenerateParams) -> serde_json::Value {
        PasswordGenerateTool::execute(p, &Config::default())
            .structured_content
            .unwrap()
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(strength(8, 1), Strength::Weak);
        assert_eq!(strength(9, 1), Strength::Weak);
        assert_eq!(strength(9, 2), Strength::Medium);
        assert_eq!(strength(13, 2), Strength::Medium);
        assert_eq!(strength(13, 3), Strength::Strong);
        assert_eq!(strength(16, 4), Strength::Strong);
    }

    #[test]
    fn test_only_digits() {
        let out = generate(&params(20, [false, false, true, false]));
        let password = out["password"].as_str().unwrap();
        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(out["strength"], "Medium");
    }

    #[test]
    fn test_symbols_from_set() {
        let out = generate(&params(64, [false, false, false, true]));
        let password = out["password"].as_str().unwrap();
        assert!(password.chars().all(|c| SYMBOLS.contains(c)));
    }

    #[test]
    fn test_empty_charset() {
        let out = generate(&params(12, [false; 4]));
        assert_eq!(out["password"], "");
        assert_eq!(out["strength"], "Weak");
    }

    #[test]
    fn test_length_bounds() {
        let config = Config::default();
        let too_short = PasswordGenerateTool::execute(&params(3, [true; 4]), &config);
        assert!(too_short.is_error.unwrap_or(false));
        let too_long = PasswordGenerateTool::execute(&params(129, [true; 4]), &config);
        assert!(too_long.is_error.unwrap_or(false));
    }

    #[test]
    fn test_defaults() {
        let p: PasswordGenerateParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(p.length, 16);
        assert_eq!(p.enabled_sets(), 4);
        assert_eq!(p.charset().len(), 26 + 26 + 10 + SYMBOLS.len());
    }
}
