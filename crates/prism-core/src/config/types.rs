//! Sub-configuration structs with defaults encoding the fixed gallery layout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Gallery directory and manifest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Directory scanned for images; also receives the manifest
    pub dir: PathBuf,

    /// Manifest file name inside the gallery directory
    pub manifest_name: String,

    /// Serve-path prefix the display layer resolves images against
    pub src_prefix: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public/gallery"),
            manifest_name: "gallery.json".to_string(),
            src_prefix: "/gallery".to_string(),
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers for per-file extraction
    pub parallel_workers: usize,

    /// Supported input extensions
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string()],
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
