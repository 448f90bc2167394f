//! Configuration management for Keepsake.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a partial file is fine.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the JSON item store inside `general.data_dir`.
pub const STORE_FILE_NAME: &str = "items.json";

/// Root configuration structure for Keepsake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Image-analysis provider settings
    pub provider: ProviderConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Photo discovery settings
    pub photos: PhotosConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.keepsake.keepsake/config.toml
    /// - Linux: ~/.config/keepsake/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\keepsake\config\config.toml
    ///
    /// Falls back to ~/.keepsake/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "keepsake", "keepsake")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".keepsake").join("config.toml")
            })
    }

    /// Get the resolved data directory path (with ~ expansion).
    pub fn data_dir(&self) -> PathBuf {
        let path_str = self.general.data_dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Path of the JSON item store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join(STORE_FILE_NAME)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
