//! Prism Core - gallery manifest extraction library.
//!
//! Prism ingests a directory of JPEG images produced by AI image generators,
//! recovers the generation parameters embedded in their metadata, and emits a
//! structured manifest describing each image: prompt, sampler settings, seed,
//! lora references, inferred tags, and a synthesized title.
//!
//! # Architecture
//!
//! A strictly forward pipeline with no persistence beyond the manifest file:
//!
//! ```text
//! Scan → Decode metadata → Parse parameters → Loras/Title/Tags → Manifest
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let count = prism_core::generate_manifest(&config, &mut rand::thread_rng()).await?;
//!     println!("Wrote {count} items");
//!     Ok(())
//! }
//! ```

use rand::Rng;

// Module declarations
pub mod config;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, PrismError, Result};
pub use manifest::{shuffle_items, ManifestWriter};
pub use pipeline::{GalleryProcessor, GalleryScanner, ScannedFile};
pub use types::{FreeUConfig, GalleryItem, ParsedParameters};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-call manifest generation for embedding Prism as a library.
///
/// Scans the configured gallery, extracts a record per image, shuffles the
/// list with the supplied RNG, and overwrites the manifest file. Returns the
/// number of items written. The CLI drives the same stages itself to hang a
/// progress bar and bounded fan-out off them; this sequential variant is the
/// plain embeddable path.
pub async fn generate_manifest<R: Rng>(config: &Config, rng: &mut R) -> Result<usize> {
    let scanner = GalleryScanner::new(config.processing.clone());
    let files = scanner.scan(&config.gallery_dir(), &config.gallery.manifest_name)?;

    let processor = GalleryProcessor::new(config);
    let mut items = Vec::with_capacity(files.len());
    for file in &files {
        items.push(processor.process(file).await);
    }

    shuffle_items(&mut items, rng);
    let count = ManifestWriter::new(config.manifest_path()).write(&items)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    /// Minimal JPEG carrying the parameter block in an XMP description.
    fn jpeg_with_params(params: &str) -> Vec<u8> {
        let packet = format!(
            "<x:xmpmeta><rdf:RDF><dc:description><rdf:Alt>\
             <rdf:li xml:lang=\"x-default\">{params}</rdf:li>\
             </rdf:Alt></dc:description></rdf:RDF></x:xmpmeta>"
        );
        let mut payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
        payload.extend_from_slice(packet.as_bytes());
        let len = (payload.len() + 2) as u16;

        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
        bytes.extend_from_slice(&len.to_be_bytes());
        bytes.extend_from_slice(&payload);
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }

    #[tokio::test]
    async fn end_to_end_manifest_generation() {
        let dir = tempfile::tempdir().unwrap();

        // Three images with seeds, one without metadata, plus a stale
        // manifest that must be ignored by its own scan
        for seed in [11, 22, 33] {
            let block = format!(
                "geometric gradient\nNegative prompt: blurry\nSteps: 20, Seed: {seed}"
            );
            std::fs::write(
                dir.path().join(format!("img-{seed}.jpg")),
                jpeg_with_params(&block),
            )
            .unwrap();
        }
        std::fs::write(dir.path().join("bare.jpg"), b"\xFF\xD8\xFF\xD9").unwrap();
        std::fs::write(dir.path().join("gallery.json"), b"[]").unwrap();

        let mut config = Config::default();
        config.gallery.dir = dir.path().to_path_buf();

        let count = generate_manifest(&config, &mut StdRng::seed_from_u64(5))
            .await
            .unwrap();
        assert_eq!(count, 4);

        let manifest: Vec<GalleryItem> =
            serde_json::from_str(&std::fs::read_to_string(config.manifest_path()).unwrap())
                .unwrap();
        assert_eq!(manifest.len(), 4);

        let ids: HashSet<&str> = manifest.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.contains("11") && ids.contains("22") && ids.contains("33"));
        assert!(ids.contains("bare"));

        let seeded = manifest.iter().find(|i| i.id == "11").unwrap();
        assert_eq!(seeded.prompt, "geometric gradient");
        assert_eq!(seeded.negative_prompt, "blurry");
        assert_eq!(seeded.steps, Some(20));
        assert_eq!(seeded.src, "/gallery/img-11.jpg");
        assert_eq!(seeded.tags, vec!["geometric", "gradient"]);

        let bare = manifest.iter().find(|i| i.id == "bare").unwrap();
        assert_eq!(bare.title, "Abstract Composition – Silent Patterns Calm #0");
        assert_eq!(bare.tags, vec!["abstract"]);
    }

    #[tokio::test]
    async fn missing_gallery_dir_aborts_before_any_write() {
        let mut config = Config::default();
        config.gallery.dir = std::path::PathBuf::from("/nonexistent/gallery");

        let err = generate_manifest(&config, &mut StdRng::seed_from_u64(0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PrismError::Pipeline(PipelineError::SourceDirMissing(_))
        ));
    }
}
