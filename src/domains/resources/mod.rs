//! Resources domain module.
//!
//! Read-only data exposed to MCP clients under the `devtools://` scheme:
//! server info, the tool catalog, unit tables, current preferences and a
//! guide to the numeric input formats.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{
    DynamicResourceType, ResourceContent, ResourceContext, ResourceEntry, ResourceService,
};
