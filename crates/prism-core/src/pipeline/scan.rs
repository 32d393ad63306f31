//! Gallery directory scanning.
//!
//! The scan is non-recursive: the gallery is a flat directory of generated
//! JPEGs plus the manifest from previous runs, which is excluded from its own
//! input even though it could never match the extension filter under the
//! default config.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;
use crate::error::{PipelineError, PipelineResult};

/// Lists eligible image files in the gallery directory.
pub struct GalleryScanner {
    config: ProcessingConfig,
}

/// One eligible image file.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File name within the gallery directory
    pub file_name: String,
}

impl ScannedFile {
    /// Base name without the extension; the manifest id fallback when the
    /// metadata carries no seed.
    pub fn base_name(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }
}

impl GalleryScanner {
    /// Create a new scanner.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// List eligible files in `dir`, excluding `manifest_name`.
    ///
    /// Fails with [`PipelineError::SourceDirMissing`] before touching any
    /// file when the directory does not exist.
    pub fn scan(&self, dir: &Path, manifest_name: &str) -> PipelineResult<Vec<ScannedFile>> {
        if !dir.is_dir() {
            return Err(PipelineError::SourceDirMissing(dir.to_path_buf()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !self.is_supported(path) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name == manifest_name {
                continue;
            }
            files.push(ScannedFile {
                path: path.to_path_buf(),
                file_name: file_name.to_string(),
            });
        }

        // Sort by name for deterministic pre-shuffle ordering (logs only;
        // the manifest ordering is randomized later regardless)
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.to_lowercase() == ext_lower)
            })
            .unwrap_or(false)
    }
}
