//! Preferences tool: read and change the theme and display name.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::common::{error_result, structured_result};
#[cfg(feature = "http")]
use super::common::{parse_arguments, to_http_response};
use crate::core::settings::{Preferences, PreferencesSnapshot};

/// What to do with the preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PreferencesAction {
    #[default]
    Get,
    Set,
    Reset,
}

/// Parameters for the preferences tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PreferencesParams {
    /// get (default), set or reset.
    #[serde(default)]
    pub action: PreferencesAction,

    /// Preference to read or set: "theme" or "name".
    #[serde(default)]
    pub key: Option<String>,

    /// New value. Theme accepts system, light or dark; an empty name clears it.
    #[serde(default)]
    pub value: Option<String>,
}

/// Preferences tool.
pub struct PreferencesTool;

impl PreferencesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "preferences";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get, set or reset user preferences (theme: system/light/dark, name).";

    #[instrument(skip_all, fields(action = ?params.action))]
    pub fn execute(params: &PreferencesParams, preferences: &Preferences) -> CallToolResult {
        info!("Preferences tool called");

        match params.action {
            PreferencesAction::Get => {
                if let Some(key) = params.key.as_deref() {
                    return match preferences.get(key) {
                        Ok(value) => structured_result(
                            format!("{}: {}", key, value.as_deref().unwrap_or("(not set)")),
                            &preferences.snapshot(),
                            false,
                        ),
                        Err(e) => error_result(&e.to_string()),
                    };
                }
            }
            PreferencesAction::Reset => preferences.reset(),
            PreferencesAction::Set => {
                let Some(key) = params.key.as_deref() else {
                    return error_result("Missing 'key' for set");
                };
                let value = params.value.as_deref().unwrap_or_default();
                if let Err(e) = preferences.set(key, value) {
                    return error_result(&e.to_string());
                }
            }
        }

        let snapshot = preferences.snapshot();
        structured_result(describe(&snapshot), &snapshot, false)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        arguments: serde_json::Value,
        preferences: &Preferences,
    ) -> Result<serde_json::Value, String> {
        let params: PreferencesParams = parse_arguments(arguments)?;
        to_http_response(&Self::execute(&params, preferences))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PreferencesParams>(),
            annotations: None,
            output_schema: Some(cached_schema_for_type::<PreferencesSnapshot>()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(preferences: Preferences) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let preferences = preferences.clone();
            async move {
                let params: PreferencesParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &preferences))
            }
            .boxed()
        })
    }
}

fn describe(snapshot: &PreferencesSnapshot) -> String {
    match &snapshot.name {
        Some(name) => format!("theme: {}\nname: {}", snapshot.theme, name),
        None => format!("theme: {}\nname: (not set)", snapshot.theme),
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::first_text;
    use super::*;
    use crate::core::settings::MemorySettingsStore;
    use std::sync::Arc;

    fn prefs() -> Preferences {
        Preferences::new(Arc::new(MemorySettingsStore::new()))
    }

    fn set(key: &str, value: &str) -> PreferencesParams {
        PreferencesParams {
            action: PreferencesAction::Set,
            key: Some(key.to_string()),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_get_defaults() {
        let result = PreferencesTool::execute(&PreferencesParams::default(), &prefs());
        assert_eq!(first_text(&result), "theme: system\nname: (not set)");
    }

    #[test]
    fn test_set_and_reset() {
        let prefs = prefs();
        PreferencesTool::execute(&set("theme", "dark"), &prefs);
        let result = PreferencesTool::execute(&set("name", "Ada"), &prefs);
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["theme"], "dark");
        assert_eq!(structured["name"], "Ada");

        let reset = PreferencesParams {
            action: PreferencesAction::Reset,
            ..Default::default()
        };
        let result = PreferencesTool::execute(&reset, &prefs);
        assert_eq!(result.structured_content.unwrap()["theme"], "system");
    }

    #[test]
    fn test_get_single_key() {
        let prefs = prefs();
        let get = |key: &str| PreferencesParams {
            key: Some(key.to_string()),
            ..Default::default()
        };
        let result = PreferencesTool::execute(&get("theme"), &prefs);
        assert_eq!(first_text(&result), "theme: system");

        let result = PreferencesTool::execute(&get("name"), &prefs);
        assert_eq!(first_text(&result), "name: (not set)");

        let result = PreferencesTool::execute(&get("font"), &prefs);
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_set_errors() {
        let prefs = prefs();
        let result = PreferencesTool::execute(&set("theme", "neon"), &prefs);
        assert!(result.is_error.unwrap_or(false));

        let result = PreferencesTool::execute(&set("font", "mono"), &prefs);
        assert_eq!(first_text(&result), "Unknown preference: font");

        let missing_key = PreferencesParams {
            action: PreferencesAction::Set,
            ..Default::default()
        };
        assert!(PreferencesTool::execute(&missing_key, &prefs).is_error.unwrap_or(false));
    }
}
