//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; tools that need
//! configuration or preferences receive them here.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::core::config::Config;
use crate::core::settings::Preferences;

use super::definitions::{
    BaseConvertTool, CatalogSearchTool, DataSanitizeTool, HashTextTool, JsonFormatTool,
    JwtDecodeTool, LoremIpsumTool, PasswordGenerateTool, PreferencesTool, RegexTestTool,
    StatisticsTool, TextCaseTool, TextCodecTool, UnitCategoriesTool, UnitConvertTool,
    UuidGenerateTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>, preferences: Preferences) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(BaseConvertTool::create_route())
        .with_route(UnitConvertTool::create_route())
        .with_route(UnitCategoriesTool::create_route())
        .with_route(StatisticsTool::create_route())
        .with_route(TextCaseTool::create_route())
        .with_route(TextCodecTool::create_route())
        .with_route(JsonFormatTool::create_route())
        .with_route(UuidGenerateTool::create_route(config.clone()))
        .with_route(RegexTestTool::create_route())
        .with_route(LoremIpsumTool::create_route())
        .with_route(HashTextTool::create_route())
        .with_route(JwtDecodeTool::create_route())
        .with_route(PasswordGenerateTool::create_route(config))
        .with_route(DataSanitizeTool::create_route())
        .with_route(CatalogSearchTool::create_route())
        .with_route(PreferencesTool::create_route(preferences))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::settings::MemorySettingsStore;

    struct TestServer {}

    fn preferences() -> Preferences {
        Preferences::new(Arc::new(MemorySettingsStore::new()))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> =
            build_tool_router(Arc::new(Config::default()), preferences());
        let tools = router.list_all();
        assert_eq!(tools.len(), 16);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"base_convert"));
        assert!(names.contains(&"statistics"));
        assert!(names.contains(&"jwt_decode"));
        assert!(names.contains(&"regex_test"));
        assert!(names.contains(&"lorem_ipsum"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let config = Arc::new(Config::default());
        let registry = ToolRegistry::new(config.clone(), preferences());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(config, preferences());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
