//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools, keyed by stable tool name
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::core::config::Config;
use crate::core::settings::Preferences;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{
    BaseConvertTool, CatalogSearchTool, DataSanitizeTool, HashTextTool, JsonFormatTool,
    JwtDecodeTool, LoremIpsumTool, PasswordGenerateTool, PreferencesTool, RegexTestTool,
    StatisticsTool, TextCaseTool, TextCodecTool, UnitCategoriesTool, UnitConvertTool,
    UuidGenerateTool,
};

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    config: Arc<Config>,
    preferences: Preferences,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>, preferences: Preferences) -> Self {
        Self {
            config,
            preferences,
        }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            BaseConvertTool::NAME,
            UnitConvertTool::NAME,
            UnitCategoriesTool::NAME,
            StatisticsTool::NAME,
            TextCaseTool::NAME,
            TextCodecTool::NAME,
            JsonFormatTool::NAME,
            UuidGenerateTool::NAME,
            RegexTestTool::NAME,
            LoremIpsumTool::NAME,
            HashTextTool::NAME,
            JwtDecodeTool::NAME,
            PasswordGenerateTool::NAME,
            DataSanitizeTool::NAME,
            CatalogSearchTool::NAME,
            PreferencesTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            BaseConvertTool::to_tool(),
            UnitConvertTool::to_tool(),
            UnitCategoriesTool::to_tool(),
            StatisticsTool::to_tool(),
            TextCaseTool::to_tool(),
            TextCodecTool::to_tool(),
            JsonFormatTool::to_tool(),
            UuidGenerateTool::to_tool(),
            RegexTestTool::to_tool(),
            LoremIpsumTool::to_tool(),
            HashTextTool::to_tool(),
            JwtDecodeTool::to_tool(),
            PasswordGenerateTool::to_tool(),
            DataSanitizeTool::to_tool(),
            CatalogSearchTool::to_tool(),
            PreferencesTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let result = match name {
            BaseConvertTool::NAME => BaseConvertTool::http_handler(arguments),
            UnitConvertTool::NAME => UnitConvertTool::http_handler(arguments),
            UnitCategoriesTool::NAME => UnitCategoriesTool::http_handler(arguments),
            StatisticsTool::NAME => StatisticsTool::http_handler(arguments),
            TextCaseTool::NAME => TextCaseTool::http_handler(arguments),
            TextCodecTool::NAME => TextCodecTool::http_handler(arguments),
            JsonFormatTool::NAME => JsonFormatTool::http_handler(arguments),
            UuidGenerateTool::NAME => UuidGenerateTool::http_handler(arguments, self.config.clone()),
            RegexTestTool::NAME => RegexTestTool::http_handler(arguments),
            LoremIpsumTool::NAME => LoremIpsumTool::http_handler(arguments),
            HashTextTool::NAME => HashTextTool::http_handler(arguments),
            JwtDecodeTool::NAME => JwtDecodeTool::http_handler(arguments),
            PasswordGenerateTool::NAME => {
                PasswordGenerateTool::http_handler(arguments, self.config.clone())
            }
            DataSanitizeTool::NAME => DataSanitizeTool::http_handler(arguments),
            CatalogSearchTool::NAME => CatalogSearchTool::http_handler(arguments),
            PreferencesTool::NAME => PreferencesTool::http_handler(arguments, &self.preferences),
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };

        result.map_err(ToolError::invalid_arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::MemorySettingsStore;
    use crate::domains::catalog;

    fn test_registry() -> ToolRegistry {
        let preferences = Preferences::new(Arc::new(MemorySettingsStore::new()));
        ToolRegistry::new(Arc::new(Config::default()), preferences)
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names.len(), 16);
        assert!(names.contains(&"base_convert"));
        assert!(names.contains(&"unit_convert"));
        assert!(names.contains(&"unit_categories"));
        assert!(names.contains(&"statistics"));
        assert!(names.contains(&"preferences"));
    }

    #[test]
    fn test_names_match_tool_models() {
        let names = test_registry().tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(names.len(), tools.len());
        for tool in &tools {
            assert!(names.contains(&tool.name.as_ref()));
        }
    }

    #[test]
    fn test_catalog_tools_are_registered() {
        let names = test_registry().tool_names();
        for entry in catalog::entries() {
            if let Some(tool) = entry.mcp_tool {
                assert!(names.contains(&tool), "{} names missing tool {}", entry.id, tool);
            }
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_base_convert() {
        let result = test_registry()
            .call_tool("base_convert", serde_json::json!({ "value": "255" }))
            .unwrap();
        assert_eq!(result["structuredContent"]["hex"], "FF");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let result = test_registry().call_tool("unknown", serde_json::json!({}));
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_bad_arguments() {
        let result = test_registry().call_tool("statistics", serde_json::json!({}));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
