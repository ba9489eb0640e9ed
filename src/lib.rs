//! Developer utilities served over the Model Context Protocol.
//!
//! The numeric core (numeral base conversion, unit conversion, descriptive
//! statistics) sits alongside text, code and security helpers, all exposed
//! as MCP tools, resources and prompts.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, preferences store, server handler, transports
//! - **domains**
//!   - **numeric**: base, unit and statistics engines
//!   - **catalog**: categorized list of every tool
//!   - **tools**: MCP tool definitions, registry and router
//!   - **resources**: `devtools://` resources
//!   - **prompts**: prompt templates backed by the numeric engines
//!
//! # Example
//!
//! ```rust,no_run
//! use devtools_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
