//! STDIO transport: one MCP session over stdin/stdout.
//!
//! Logs go to stderr so they never interleave with protocol frames.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single client until stdin closes.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - {} speaking MCP on stdin/stdout", server.name());

        let running = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = running
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO session ended: {:?}", reason);
        Ok(())
    }
}
