//! Code tools: hashing and JWT inspection.

pub mod hash;
pub mod jwt;

pub use hash::HashTextTool;
pub use jwt::JwtDecodeTool;
