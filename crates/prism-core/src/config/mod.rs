//! Configuration management for Prism.
//!
//! Configuration is loaded from a platform config dir (falling back to
//! `~/.prism/config.toml`) with sensible defaults. The defaults encode the
//! fixed gallery layout the generate command operates on, so a run needs no
//! flags at all.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Prism.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gallery directory and manifest settings
    pub gallery: GalleryConfig,

    /// Processing settings
    pub processing: ProcessingConfig,

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
    /// - macOS: ~/Library/Application Support/com.prism.prism/config.toml
    /// - Linux: ~/.config/prism/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\prism\config\config.toml
    ///
    /// Falls back to ~/.prism/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "prism", "prism")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".prism").join("config.toml")
            })
    }

    /// Get the resolved gallery directory path (with ~ expansion).
    pub fn gallery_dir(&self) -> PathBuf {
        let path_str = self.gallery.dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Full path of the manifest file inside the gallery directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.gallery_dir().join(&self.gallery.manifest_name)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
