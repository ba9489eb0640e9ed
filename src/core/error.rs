//! Error types and handling for the devtools MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies.

use thiserror::Error;

/// A specialized Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Error from the numeric converters.
    #[error("Numeric error: {0}")]
    Numeric(#[from] crate::domains::numeric::NumericError),

    /// Error reading or writing preferences.
    #[error("Settings error: {0}")]
    Settings(#[from] super::settings::SettingsError),

    /// Transport failures (bind, serve, protocol).
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::numeric::{Base, convert_base};

    fn hex_of(dec: &str) -> Result<String> {
        Ok(convert_base(dec, Base::Dec)?.hex)
    }

    #[test]
    fn test_domain_errors_convert() {
        assert_eq!(hex_of("255").unwrap(), "FF");

        let err = hex_of("12a").unwrap_err();
        assert!(matches!(err, Error::Numeric(_)));
        assert_eq!(err.to_string(), "Numeric error: Invalid decimal digit 'a'");
    }

    #[test]
    fn test_settings_error_converts() {
        let err: Error = "neon".parse::<crate::core::settings::Theme>().unwrap_err().into();
        assert!(matches!(err, Error::Settings(_)));
    }
}
