//! Per-file orchestration - wires together the extraction stages.

use crate::config::Config;
use crate::types::GalleryItem;

use super::exif::FieldDecoder;
use super::params::parse_parameters;
use super::scan::ScannedFile;
use super::tags::infer_tags;

/// Turns one scanned file into a manifest record.
///
/// Processing is infallible by design: a file whose metadata cannot be read
/// or decoded still produces a record with default parameters, a generic
/// synthesized title, and the fallback tag. Only the scan and the final
/// manifest write can fail a run.
#[derive(Debug, Clone)]
pub struct GalleryProcessor {
    src_prefix: String,
    created_at: String,
}

impl GalleryProcessor {
    /// Create a processor for one manifest-generation run.
    ///
    /// The run date is captured once here so every record of the run carries
    /// the same `createdAt`.
    pub fn new(config: &Config) -> Self {
        Self {
            src_prefix: config.gallery.src_prefix.trim_end_matches('/').to_string(),
            created_at: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Run one file through decode → parse → tag inference.
    pub async fn process(&self, file: &ScannedFile) -> GalleryItem {
        let start = std::time::Instant::now();
        tracing::debug!("Processing: {:?}", file.path);

        let bytes = tokio::fs::read(&file.path).await.unwrap_or_default();

        let decode_start = std::time::Instant::now();
        let blob = FieldDecoder::decode(&bytes);
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let parse_start = std::time::Instant::now();
        let params = parse_parameters(&blob);
        tracing::trace!("  Parse: {:?}", parse_start.elapsed());

        let tags = infer_tags(&params.prompt);

        // Seed as id when present, else the file's base name
        let id = match params.seed {
            Some(seed) => seed.to_string(),
            None => file.base_name().to_string(),
        };
        let src = format!("{}/{}", self.src_prefix, file.file_name);

        tracing::debug!(
            "Processed {:?} in {:?} (id {})",
            file.file_name,
            start.elapsed(),
            id
        );

        GalleryItem::from_parameters(id, src, tags, params, self.created_at.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scanned(dir: &std::path::Path, name: &str) -> ScannedFile {
        ScannedFile {
            path: dir.join(name),
            file_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn metadata_less_file_yields_default_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plain.jpg"), b"\xFF\xD8\xFF\xD9").unwrap();

        let processor = GalleryProcessor::new(&Config::default());
        let item = processor.process(&scanned(dir.path(), "plain.jpg")).await;

        assert_eq!(item.id, "plain");
        assert_eq!(item.src, "/gallery/plain.jpg");
        assert_eq!(item.title, "Abstract Composition – Silent Patterns Calm #0");
        assert_eq!(item.tags, vec!["abstract"]);
        assert_eq!(item.prompt, "");
        assert_eq!(item.seed, None);
    }

    #[tokio::test]
    async fn unreadable_file_does_not_abort() {
        let processor = GalleryProcessor::new(&Config::default());
        let item = processor
            .process(&ScannedFile {
                path: PathBuf::from("/nonexistent/gone.jpg"),
                file_name: "gone.jpg".to_string(),
            })
            .await;
        assert_eq!(item.id, "gone");
        assert_eq!(item.tags, vec!["abstract"]);
    }

    #[tokio::test]
    async fn created_at_is_the_run_date() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"").unwrap();

        let processor = GalleryProcessor::new(&Config::default());
        let item = processor.process(&scanned(dir.path(), "a.jpg")).await;

        // YYYY-MM-DD
        assert_eq!(item.created_at.len(), 10);
        assert_eq!(item.created_at.matches('-').count(), 2);
    }
}
