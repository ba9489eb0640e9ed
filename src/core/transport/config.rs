//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[cfg(feature = "stdio")]
    Stdio,

    /// TCP socket transport with JSON-RPC messages.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// HTTP transport with JSON-RPC over POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP transport configuration.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: default_host(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl TransportConfig {
    /// TCP transport on `host:port`.
    #[cfg(feature = "tcp")]
    pub fn tcp(port: u16, host: impl Into<String>) -> Self {
        Self::Tcp(TcpConfig {
            port,
            host: host.into(),
        })
    }

    /// HTTP transport on `host:port` with the default path and CORS.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Read `MCP_TRANSPORT` and the matching `MCP_TCP_*` / `MCP_HTTP_*` variables.
    ///
    /// Unknown transports and unparsable ports fall back to defaults with a warning.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig {
                port: env_port("MCP_TCP_PORT", TcpConfig::default().port),
                host: std::env::var("MCP_TCP_HOST").unwrap_or_else(|_| default_host()),
            }),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig {
                port: env_port("MCP_HTTP_PORT", HttpConfig::default().port),
                host: std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host()),
                rpc_path: std::env::var("MCP_HTTP_PATH")
                    .map(|p| normalize_path(&p))
                    .unwrap_or_else(|_| default_rpc_path()),
                enable_cors: std::env::var("MCP_HTTP_CORS")
                    .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                    .unwrap_or_else(|_| default_cors()),
            }),
            "" | "stdio" => Self::default(),
            other => {
                tracing::warn!("Unknown or disabled transport '{}', using default", other);
                Self::default()
            }
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn env_port(var: &str, default: u16) -> u16 {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {} value: {}", var, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Ensure the RPC path starts with a single `/`.
#[cfg(feature = "http")]
fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        assert!(matches!(TransportConfig::default(), TransportConfig::Stdio));
        assert_eq!(TransportConfig::default().description(), "STDIO (standard MCP mode)");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults() {
        let config = TransportConfig::http(9000, "0.0.0.0");
        assert_eq!(config.description(), "HTTP on 0.0.0.0:9000/mcp");
        assert_eq!(normalize_path("rpc"), "/rpc");
        assert_eq!(normalize_path("//rpc"), "/rpc");
    }

    #[cfg(feature = "tcp")]
    #[test]
    fn test_tcp_config_deserializes_with_default_host() {
        let config: TransportConfig =
            serde_json::from_str(r#"{"type": "tcp", "port": 4100}"#).unwrap();
        assert_eq!(config.description(), "TCP on 127.0.0.1:4100");
    }
}
