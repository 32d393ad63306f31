//! Manifest assembly: shuffle and final write.
//!
//! The item list is shuffled uniformly (Fisher–Yates via `SliceRandom`)
//! before serialization so the display layer gets a fresh ordering each run.
//! The RNG is injected: production passes `rand::thread_rng()`, tests pass a
//! seeded `StdRng` to pin the permutation.
//!
//! The write is serialize-then-write: the whole pretty-printed array is
//! rendered in memory first, so a failed write never leaves a partially
//! populated manifest behind.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{PipelineError, PipelineResult};
use crate::types::GalleryItem;

/// Apply a uniform random permutation to the item list.
pub fn shuffle_items<R: Rng + ?Sized>(items: &mut [GalleryItem], rng: &mut R) {
    items.shuffle(rng);
}

/// Writes the manifest file, overwriting any previous run's output.
pub struct ManifestWriter {
    path: PathBuf,
}

impl ManifestWriter {
    /// Create a writer for the given manifest path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The manifest path this writer targets.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the items as a pretty-printed JSON array and write them.
    ///
    /// Returns the number of items written.
    pub fn write(&self, items: &[GalleryItem]) -> PipelineResult<usize> {
        let mut json = serde_json::to_string_pretty(items)?;
        json.push('\n');
        std::fs::write(&self.path, json).map_err(|source| PipelineError::ManifestWrite {
            path: self.path.clone(),
            source,
        })?;
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str) -> GalleryItem {
        GalleryItem {
            id: id.to_string(),
            src: format!("/gallery/{id}.jpg"),
            title: "Abstract Composition – Silent Patterns Calm #0".to_string(),
            tags: vec!["abstract".to_string()],
            prompt: String::new(),
            negative_prompt: String::new(),
            steps: None,
            sampler: None,
            cfg: None,
            seed: None,
            size: None,
            model: None,
            model_hash: None,
            vae: None,
            version: None,
            freeu: None,
            loras: vec![],
            created_at: "2025-01-01".to_string(),
        }
    }

    fn items(n: usize) -> Vec<GalleryItem> {
        (0..n).map(|i| item(&format!("seed-{i}"))).collect()
    }

    #[test]
    fn shuffle_preserves_the_multiset() {
        let original = items(12);
        let mut shuffled = original.clone();
        shuffle_items(&mut shuffled, &mut StdRng::seed_from_u64(42));

        assert_eq!(shuffled.len(), original.len());
        let mut sorted: Vec<String> = shuffled.iter().map(|i| i.id.clone()).collect();
        sorted.sort();
        let mut expected: Vec<String> = original.iter().map(|i| i.id.clone()).collect();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn shuffle_is_deterministic_under_a_seeded_rng() {
        let mut a = items(12);
        let mut b = items(12);
        shuffle_items(&mut a, &mut StdRng::seed_from_u64(7));
        shuffle_items(&mut b, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_not_the_identity() {
        // A uniform draw over 12 elements is identity with probability
        // 1/12!; five independent draws all being identity is absurd
        let original = items(12);
        let permuted = (0..5).any(|seed| {
            let mut shuffled = original.clone();
            shuffle_items(&mut shuffled, &mut StdRng::seed_from_u64(seed));
            shuffled != original
        });
        assert!(permuted);
    }

    #[test]
    fn write_emits_pretty_array_and_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        let writer = ManifestWriter::new(&path);

        let count = writer.write(&items(3)).unwrap();
        assert_eq!(count, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n"));
        let parsed: Vec<GalleryItem> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn write_overwrites_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        let writer = ManifestWriter::new(&path);

        writer.write(&items(5)).unwrap();
        writer.write(&items(2)).unwrap();

        let parsed: Vec<GalleryItem> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn write_failure_is_surfaced() {
        let writer = ManifestWriter::new("/nonexistent/dir/gallery.json");
        let result = writer.write(&items(1));
        assert!(matches!(
            result,
            Err(PipelineError::ManifestWrite { .. })
        ));
    }

    #[test]
    fn empty_manifest_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        let count = ManifestWriter::new(&path).write(&[]).unwrap();
        assert_eq!(count, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }
}
