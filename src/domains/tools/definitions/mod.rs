//! Tool definitions module.
//!
//! Tools are grouped by catalog area, one file per tool:
//! - `data/` - base, unit and statistics calculators
//! - `text/` - case conversion, encoding, JSON, UUIDs, regex, lorem ipsum
//! - `code/` - hashes and JWT inspection
//! - `security/` - passwords and data sanitizing
//!
//! `catalog` and `preferences` serve the catalog search and user settings.

pub mod catalog;
pub mod code;
pub mod common;
pub mod data;
pub mod preferences;
pub mod security;
pub mod text;

pub use catalog::CatalogSearchTool;
pub use code::{HashTextTool, JwtDecodeTool};
pub use data::{BaseConvertTool, StatisticsTool, UnitCategoriesTool, UnitConvertTool};
pub use preferences::PreferencesTool;
pub use security::{DataSanitizeTool, PasswordGenerateTool};
pub use text::{
    JsonFormatTool, LoremIpsumTool, RegexTestTool, TextCaseTool, TextCodecTool, UuidGenerateTool,
};
