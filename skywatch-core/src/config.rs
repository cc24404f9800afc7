use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitGroup;

/// Placeholder shipped in the sample config; a key still containing it is
/// treated as not configured.
const KEY_PLACEHOLDER: &str = "PASTE_YOUR";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "ABC123"
/// units = "metric"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Visual Crossing API key.
    #[serde(default)]
    pub api_key: String,

    /// Unit system applied to all displayed values.
    #[serde(default)]
    pub units: UnitGroup,
}

impl Config {
    /// Return the API key if one is actually configured.
    ///
    /// Empty, whitespace-only, and placeholder keys all count as missing,
    /// so first-run users get the configuration hint instead of a 401.
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() || key.contains(KEY_PLACEHOLDER) {
            None
        } else {
            Some(key)
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skywatch", "skywatch")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
