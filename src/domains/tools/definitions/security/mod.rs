//! Security tools: password generation and data sanitizing.

pub mod password;
pub mod sanitize;

pub use password::PasswordGenerateTool;
pub use sanitize::DataSanitizeTool;
