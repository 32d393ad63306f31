//! Core data types for the Prism manifest pipeline.
//!
//! These types represent one manifest record per gallery image and the
//! intermediate parse result the record is built from. The wire format is
//! camelCase JSON with absent optionals omitted (never `null`); `tags` and
//! `loras` always serialize as arrays, empty when nothing matched.

use serde::{Deserialize, Serialize};

/// Generation parameters recovered from one image's embedded metadata.
///
/// Numeric fields are `None` (never zero) when the source key was absent or
/// not numeric. `prompt` and `negative_prompt` never contain the literal
/// `Negative prompt:` / `Steps:` markers used to delimit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedParameters {
    /// Synthesized display title (deterministic in prompt and seed)
    pub title: String,

    /// Positive prompt text, normalized; inline lora directives retained
    pub prompt: String,

    /// Negative prompt text, normalized; empty when the block had none
    pub negative_prompt: String,

    /// Sampling step count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,

    /// Sampler name, joined with the schedule type when both were recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampler: Option<String>,

    /// Classifier-free guidance scale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<f64>,

    /// Generation seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    /// Output dimensions (e.g. "1024x1024")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Checkpoint name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Checkpoint short hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_hash: Option<String>,

    /// VAE module ("Module 1" key, falling back to "VAE")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vae: Option<String>,

    /// Generator version string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// FreeU settings, present only when the enabling key was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeu: Option<FreeUConfig>,

    /// Inline `<lora:name:weight>` references in order of appearance
    pub loras: Vec<String>,
}

/// FreeU backbone/skip scaling settings.
///
/// Each numeric sub-field is parsed independently; an absent key stays
/// `None` rather than defaulting to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeUConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// One manifest record, consumed read-only by the display layer.
///
/// The display layer treats every field except `id`, `src`, `tags`, and
/// `prompt` as optional and applies its own render-time defaults ("Untitled"
/// title, empty tag set, positional `item-<n>` ids), so nothing here is ever
/// serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Unique within one manifest: the decimal seed when finite, else the
    /// file's base name
    pub id: String,

    /// Serve path for the image (gallery prefix + file name)
    pub src: String,

    pub title: String,

    /// Inferred tags, never empty (fallback tag "abstract")
    pub tags: Vec<String>,

    pub prompt: String,
    pub negative_prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vae: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeu: Option<FreeUConfig>,

    pub loras: Vec<String>,

    /// Run date (YYYY-MM-DD), not derived from any embedded timestamp
    pub created_at: String,
}

impl GalleryItem {
    /// Build a record from parsed parameters plus per-file identity.
    pub fn from_parameters(
        id: impl Into<String>,
        src: impl Into<String>,
        tags: Vec<String>,
        params: ParsedParameters,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            title: params.title,
            tags,
            prompt: params.prompt,
            negative_prompt: params.negative_prompt,
            steps: params.steps,
            sampler: params.sampler,
            cfg: params.cfg,
            seed: params.seed,
            size: params.size,
            model: params.model,
            model_hash: params.model_hash,
            vae: params.vae,
            version: params.version,
            freeu: params.freeu,
            loras: params.loras,
            created_at: created_at.into(),
        }
    }
}
