//! Application configuration management.
//!
//! Handles loading and saving application-wide settings that are not part of
//! study progress: the preferred theme, the keybinding profile, and custom
//! key overrides. CLI flags take precedence over the stored values.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::cli::ThemeArg;
use crate::tui::KeybindingProfile;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preferred TUI theme.
    #[serde(default)]
    pub theme: ThemeArg,

    /// Preferred keybinding profile.
    #[serde(default)]
    pub keybindings: KeybindingProfile,

    /// Custom key overrides: action name to key specs, merged on top of the
    /// profile (e.g. `{"next_question": ["Ctrl+n"]}`).
    #[serde(default)]
    pub custom_bindings: HashMap<String, Vec<String>>,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Any failure falls back to defaults; a broken config file should never
    /// keep the application from starting.
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save the configuration to the default platform-specific path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "quizdrill", "quizdrill")
            .ok_or_else(|| anyhow::anyhow!("failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeArg::Auto);
        assert_eq!(config.keybindings, KeybindingProfile::Universal);
        assert!(config.custom_bindings.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config {
            theme: ThemeArg::Light,
            keybindings: KeybindingProfile::Vim,
            custom_bindings: HashMap::new(),
        };
        config
            .custom_bindings
            .insert("quit".to_string(), vec!["x".to_string()]);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.theme, ThemeArg::Light);
        assert_eq!(parsed.keybindings, KeybindingProfile::Vim);
        assert_eq!(parsed.custom_bindings["quit"], vec!["x".to_string()]);
    }

    #[test]
    fn test_config_partial_document() {
        let parsed: Config = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(parsed.theme, ThemeArg::Dark);
        assert_eq!(parsed.keybindings, KeybindingProfile::Universal);
    }
}
