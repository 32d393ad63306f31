//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if self.gallery.manifest_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gallery.manifest_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}
