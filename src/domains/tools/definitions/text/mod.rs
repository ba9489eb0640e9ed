//! Text tools: case conversion, encoding, JSON formatting, UUIDs, regex
//! testing and placeholder text.

pub mod case;
pub mod codec;
pub mod json;
pub mod lorem;
pub mod regex_tester;
pub mod uuid;

pub use case::TextCaseTool;
pub use codec::TextCodecTool;
pub use json::JsonFormatTool;
pub use lorem::LoremIpsumTool;
pub use regex_tester::RegexTestTool;
pub use self::uuid::UuidGenerateTool;
