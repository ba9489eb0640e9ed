//! TCP transport: one MCP session per accepted connection.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportError, TransportResult, config::TcpConfig, shutdown_signal};
use crate::core::McpServer;

/// Pause after a failed accept before retrying.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept clients until Ctrl-C. Open sessions keep running on their own tasks.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
                        }
                        tokio::spawn(serve_client(server.clone(), stream, peer));
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },
            }
        }

        info!("TCP transport stopped accepting connections");
        Ok(())
    }
}

async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    info!("Client {} connected", peer);

    let running = match server.serve(stream).await {
        Ok(running) => running,
        Err(e) => {
            warn!("Handshake with {} failed: {}", peer, e);
            return;
        }
    };

    match running.waiting().await {
        Ok(reason) => info!("Client {} disconnected: {:?}", peer, reason),
        Err(e) => warn!("Session with {} failed: {:?}", peer, e),
    }
}
