//
//  seafile-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving, and accessing the CLI's settings, stored as TOML in a
//! platform-specific directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/sf/config.toml`
//! - **macOS**: `~/Library/Application Support/sf/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\sf\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! server_url = "https://cloud.seafile.com"
//! login_name = "me@example.com"
//! prompt = "enabled"
//!
//! [aliases]
//! notes = "7f1c0e5a-3b2d-4c1e-9f8a-0123456789ab"
//! ```
//!
//! Tokens are never written here; they live in the system keyring.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::url::normalize_server_url;

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["server_url", "login_name", "prompt"];

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    /// Repository aliases: short name → repository ID.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// Seafile server, e.g. `https://cloud.seafile.com`.
    #[serde(default)]
    pub server_url: Option<String>,

    /// Account login name (usually an email address).
    #[serde(default)]
    pub login_name: Option<String>,

    /// Whether commands may ask interactively.
    #[serde(default)]
    pub prompt: PromptSetting,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            login_name: None,
            prompt: PromptSetting::Enabled,
        }
    }
}

/// Value of the `prompt` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSetting {
    #[default]
    Enabled,
    Disabled,
}

impl PromptSetting {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "sf")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server_url" => self.core.server_url.clone(),
            "login_name" => self.core.login_name.clone(),
            "prompt" => Some(self.core.prompt.as_str().to_string()),
            _ => None,
        }
    }

    /// Sets a configuration key.
    ///
    /// Fails for unknown keys and for a `prompt` value other than `enabled`
    /// or `disabled`; the configuration is left unchanged.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "server_url" => self.core.server_url = Some(normalize_server_url(&value)),
            "login_name" => self.core.login_name = Some(value),
            "prompt" => match PromptSetting::parse(&value) {
                Some(setting) => self.core.prompt = setting,
                None => bail!(
                    "Invalid value for prompt: '{}'. Valid values: enabled, disabled",
                    value
                ),
            },
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Resets a configuration key to its default. Returns `false` for unknown keys.
    pub fn unset(&mut self, key: &str) -> bool {
        match key {
            "server_url" => self.core.server_url = None,
            "login_name" => self.core.login_name = None,
            "prompt" => self.core.prompt = PromptSetting::default(),
            _ => return false,
        }
        true
    }

    pub fn prompt_enabled(&self) -> bool {
        self.core.prompt == PromptSetting::Enabled
    }

    /// Resolves a repository alias to its ID; other values pass through.
    pub fn resolve_alias<'a>(&'a self, repo: &'a str) -> &'a str {
        self.aliases.get(repo).map(String::as_str).unwrap_or(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.prompt_enabled());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("server_url", "https://x.com/".to_string()).unwrap();
        config.set("login_name", "me@example.com".to_string()).unwrap();
        config
            .aliases
            .insert("notes".to_string(), "7f1c0e5a-3b2d-4c1e-9f8a-0123456789ab".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("server_url").as_deref(), Some("https://x.com"));
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("editor", "vim".to_string()).is_err());
        assert_eq!(config.get("editor"), None);
        assert!(!config.unset("editor"));
    }

    #[test]
    fn test_unset_restores_default() {
        let mut config = Config::default();
        config.set("prompt", "disabled".to_string()).unwrap();
        config.set("login_name", "me".to_string()).unwrap();

        assert!(config.unset("prompt"));
        assert!(config.unset("login_name"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_prompt_accepts_only_known_values() {
        let mut config = Config::default();

        config.set("prompt", "disabled".to_string()).unwrap();
        assert!(!config.prompt_enabled());
        assert_eq!(config.get("prompt").as_deref(), Some("disabled"));

        for bad in ["off", "Disabled", "", "no"] {
            assert!(config.set("prompt", bad.to_string()).is_err());
        }
        assert!(!config.prompt_enabled());

        config.set("prompt", "enabled".to_string()).unwrap();
        assert!(config.prompt_enabled());
    }

    #[test]
    fn test_invalid_prompt_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[core]\nprompt = \"sometimes\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_resolve_alias() {
        let mut config = Config::default();
        config.aliases.insert("notes".to_string(), "abc".to_string());
        assert_eq!(config.resolve_alias("notes"), "abc");
        assert_eq!(config.resolve_alias("other"), "other");
    }

    #[test]
    fn test_parse_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[core]\nprompt = \"disabled\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.prompt_enabled());
        assert_eq!(config.core.server_url, None);
        assert!(config.aliases.is_empty());
    }
}
