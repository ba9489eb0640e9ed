//! Core infrastructure shared by every domain: configuration, errors, the
//! preferences store, the MCP server handler and its transports.

pub mod config;
pub mod error;
pub mod server;
pub mod settings;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use settings::{MemorySettingsStore, Preferences, SettingsStore, Theme};
pub use transport::{TransportConfig, TransportService};
