//! Prompts domain module.
//!
//! Prompts are message templates filled from client arguments. Each prompt
//! can compute extra values (statistics, conversions) before rendering.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual prompt definitions (one file per prompt)
//! - `registry.rs` - Central prompt registration
//! - `service.rs` - Prompt service for listing and rendering
//! - `templates.rs` - Template parser and renderer

pub mod definitions;
mod error;
mod registry;
mod service;
pub mod templates;

pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{get_all_prompts, prompt_names};
pub use service::PromptService;
pub use templates::PromptTemplate;
