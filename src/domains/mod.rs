//! Business logic grouped by area.
//!
//! `numeric` and `catalog` are plain Rust with no MCP types; `tools`,
//! `resources` and `prompts` adapt them to the protocol.

pub mod catalog;
pub mod numeric;
pub mod prompts;
pub mod resources;
pub mod tools;
