//! User preference storage.
//!
//! Preferences are plain key/value pairs held by an injected
//! [`SettingsStore`]. The in-memory store lives as long as the server
//! process; nothing is written to disk.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

/// Errors raised when reading or writing preferences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The key is not a known preference.
    #[error("Unknown preference: {0}")]
    UnknownKey(String),

    /// The value is not valid for the key.
    #[error("Invalid value '{value}' for preference '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Key/value storage for preferences.
pub trait SettingsStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: String);

    /// Delete a value, returning what was stored.
    fn remove(&self, key: &str) -> Option<String>;

    /// Copy of every stored pair, sorted by key.
    fn snapshot(&self) -> BTreeMap<String, String>;
}

/// Process-local [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        debug!("Setting preference {} = {}", key, value);
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<String> {
        debug!("Removing preference {}", key);
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.remove(key)
    }

    fn snapshot(&self) -> BTreeMap<String, String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the client's system setting (nothing stored).
    #[default]
    System,
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(name)
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(SettingsError::InvalidValue {
                key: Preferences::THEME_KEY.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Current value of every preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct PreferencesSnapshot {
    pub theme: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Typed access to the known preferences.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn SettingsStore>,
}

impl Preferences {
    pub const THEME_KEY: &'static str = "theme";
    pub const NAME_KEY: &'static str = "name";

    /// Keys accepted by [`Preferences::set`].
    pub const KEYS: [&'static str; 2] = [Self::THEME_KEY, Self::NAME_KEY];

    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Stored theme; absent or unreadable values mean `System`.
    pub fn theme(&self) -> Theme {
        self.store
            .get(Self::THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Store a theme. `System` clears the stored value.
    pub fn set_theme(&self, theme: Theme) {
        match theme {
            Theme::System => {
                self.store.remove(Self::THEME_KEY);
            }
            other => self.store.set(Self::THEME_KEY, other.to_string()),
        }
    }

    /// Display name used in greetings.
    pub fn name(&self) -> Option<String> {
        self.store.get(Self::NAME_KEY)
    }

    /// Store a display name. Blank names clear the stored value.
    pub fn set_name(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.store.remove(Self::NAME_KEY);
        } else {
            self.store.set(Self::NAME_KEY, name.to_string());
        }
    }

    /// Set a preference by key, validating the value.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            Self::THEME_KEY => {
                self.set_theme(value.parse()?);
                Ok(())
            }
            Self::NAME_KEY => {
                self.set_name(value);
                Ok(())
            }
            _ => Err(SettingsError::UnknownKey(key.to_string())),
        }
    }

    /// Read a preference by key, as stored text.
    pub fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match key {
            Self::THEME_KEY => Ok(Some(self.theme().to_string())),
            Self::NAME_KEY => Ok(self.name()),
            _ => Err(SettingsError::UnknownKey(key.to_string())),
        }
    }

    /// Clear every known preference.
    pub fn reset(&self) {
        for key in Self::KEYS {
            self.store.remove(key);
        }
    }

    pub fn snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            theme: self.theme(),
            name: self.name(),
        }
    }
}

impl fmt::Debug for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preferences")
            .field("theme", &self.theme())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> (Arc<MemorySettingsStore>, Preferences) {
        let store = Arc::new(MemorySettingsStore::new());
        (store.clone(), Preferences::new(store))
    }

    #[test]
    fn test_theme_defaults_to_system() {
        let (_, prefs) = prefs();
        assert_eq!(prefs.theme(), Theme::System);
    }

    #[test]
    fn test_system_theme_removes_key() {
        let (store, prefs) = prefs();
        prefs.set_theme(Theme::Dark);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));

        prefs.set_theme(Theme::System);
        assert!(store.get("theme").is_none());
        assert_eq!(prefs.theme(), Theme::System);
    }

    #[test]
    fn test_corrupt_theme_reads_as_system() {
        let (store, prefs) = prefs();
        store.set("theme", "sepia".to_string());
        assert_eq!(prefs.theme(), Theme::System);
    }

    #[test]
    fn test_set_by_key() {
        let (_, prefs) = prefs();
        prefs.set("theme", "Light").unwrap();
        prefs.set("name", "  Ada ").unwrap();
        assert_eq!(
            prefs.snapshot(),
            PreferencesSnapshot {
                theme: Theme::Light,
                name: Some("Ada".to_string()),
            }
        );

        assert_eq!(
            prefs.set("font", "mono"),
            Err(SettingsError::UnknownKey("font".to_string()))
        );
        assert!(matches!(
            prefs.set("theme", "neon"),
            Err(SettingsError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_name_clears() {
        let (_, prefs) = prefs();
        prefs.set_name("Grace");
        prefs.set_name("   ");
        assert!(prefs.name().is_none());
    }

    #[test]
    fn test_reset() {
        let (store, prefs) = prefs();
        prefs.set_theme(Theme::Dark);
        prefs.set_name("Linus");
        prefs.reset();
        assert!(store.snapshot().is_empty());
    }
}
