//! Transport layer for the MCP server.
//!
//! - **STDIO**: standard input/output (default) - feature `stdio`
//! - **TCP**: line-delimited JSON-RPC over raw sockets - feature `tcp`
//! - **HTTP**: JSON-RPC over POST - feature `http`
//!
//! Every transport drives the same [`McpServer`](crate::core::McpServer);
//! TCP and HTTP share one preferences store across all clients.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;

/// Resolves when the process receives Ctrl-C.
#[cfg(any(feature = "tcp", feature = "http"))]
pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
