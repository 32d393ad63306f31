//! Metadata extraction pipeline components.
//!
//! The stages, leaves first:
//! - **scan**: list eligible gallery files
//! - **exif**: recover the raw parameter blob from embedded metadata
//! - **params**: parse the blob into typed generation parameters
//! - **lora**: extract inline `<lora:...>` directives from the prompt
//! - **title**: deterministic display title from (prompt, seed)
//! - **tags**: keyword-based tag inference over the prompt
//! - **processor**: per-file orchestration of the above
//!
//! Data flows strictly forward; no stage depends on a later one.

pub mod exif;
pub mod lora;
pub mod params;
pub mod processor;
pub mod scan;
pub mod tags;
pub mod title;

// Re-exports for convenient access
pub use exif::FieldDecoder;
pub use lora::extract_loras;
pub use params::parse_parameters;
pub use processor::GalleryProcessor;
pub use scan::{GalleryScanner, ScannedFile};
pub use tags::infer_tags;
pub use title::synthesize_title;
