//! Error types for the Prism manifest pipeline.
//!
//! Errors are organized by stage to provide clear, actionable error messages
//! that include relevant context (file paths, stage names, specific issues).
//!
//! Per-field metadata decode failures are deliberately *not* errors: the
//! decoder falls through to the next candidate field and ultimately yields an
//! empty blob, which is valid parser input. Only the fatal conditions
//! (missing gallery directory, manifest write failure) surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Prism operations.
#[derive(Error, Debug)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The gallery source directory does not exist. Fatal before any
    /// per-file work starts.
    #[error("Gallery directory not found: {0}")]
    SourceDirMissing(PathBuf),

    /// Serializing the manifest array failed.
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the manifest file failed. Serialization happens fully in
    /// memory first, so a failed write never leaves a partial manifest.
    #[error("Failed to write manifest {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Prism results.
pub type Result<T> = std::result::Result<T, PrismError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
