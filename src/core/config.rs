//! Configuration management for the devtools MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::settings::Theme;
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Limits applied by the generator tools.
    pub tools: ToolsConfig,

    /// Initial user preferences.
    pub preferences: PreferencesConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Upper bounds for tools that generate output of caller-chosen size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Maximum UUIDs produced by one `uuid_generate` call.
    pub max_uuids: usize,

    /// Maximum password length accepted by `password_generate`.
    pub max_password_length: usize,
}

/// Preferences applied when the server starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Theme stored before any client changes it.
    pub default_theme: Theme,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_uuids: 100,
            max_password_length: 128,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "devtools-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            preferences: PreferencesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(max) = std::env::var("MCP_MAX_UUIDS") {
            match max.parse::<usize>() {
                Ok(n) if n > 0 => config.tools.max_uuids = n,
                _ => warn!("Ignoring invalid MCP_MAX_UUIDS value: {}", max),
            }
        }

        if let Ok(max) = std::env::var("MCP_MAX_PASSWORD_LENGTH") {
            match max.parse::<usize>() {
                Ok(n) if n >= 4 => config.tools.max_password_length = n,
                _ => warn!("Ignoring invalid MCP_MAX_PASSWORD_LENGTH value: {}", max),
            }
        }

        if let Ok(theme) = std::env::var("MCP_DEFAULT_THEME") {
            match theme.parse::<Theme>() {
                Ok(t) => {
                    config.preferences.default_theme = t;
                    info!("Default theme set to {}", t);
                }
                Err(e) => warn!("{}", e),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_tool_limits_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_MAX_UUIDS", "7");
            std::env::set_var("MCP_MAX_PASSWORD_LENGTH", "2");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.max_uuids, 7);
        // Below the minimum, so the default is kept
        assert_eq!(config.tools.max_password_length, 128);
        unsafe {
            std::env::remove_var("MCP_MAX_UUIDS");
            std::env::remove_var("MCP_MAX_PASSWORD_LENGTH");
        }
    }

    #[test]
    fn test_default_theme_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DEFAULT_THEME", "dark");
        }
        let config = Config::from_env();
        assert_eq!(config.preferences.default_theme, Theme::Dark);
        unsafe {
            std::env::remove_var("MCP_DEFAULT_THEME");
        }
    }

    #[test]
    fn test_invalid_theme_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DEFAULT_THEME", "plaid");
        }
        let config = Config::from_env();
        assert_eq!(config.preferences.default_theme, Theme::System);
        unsafe {
            std::env::remove_var("MCP_DEFAULT_THEME");
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "devtools-mcp-server");
        assert_eq!(config.tools.max_uuids, 100);
        assert_eq!(config.logging.level, "info");
    }
}
