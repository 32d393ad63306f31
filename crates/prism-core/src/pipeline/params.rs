//! Parameter-block parsing: splitting the raw metadata blob into prompt,
//! negative prompt, and typed generation settings.
//!
//! The block follows the conventional layout
//!
//! ```text
//! <prompt text>
//! Negative prompt: <negative text>
//! Steps: 20, Sampler: Euler a, CFG scale: 7, Seed: 42, ...
//! ```
//!
//! where both markers are optional. The trailing settings line is a
//! comma-separated run of `key: value` fragments; fragments that do not fit
//! that shape are dropped without failing the parse (vendor fields are too
//! inconsistent to validate), with a debug-level count so dropped data is
//! discoverable.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FreeUConfig, ParsedParameters};

use super::lora::extract_loras;
use super::title::synthesize_title;

const NEGATIVE_MARKER: &str = "\nNegative prompt:";
const STEPS_MARKER: &str = "\nSteps:";

static COMMA_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

/// Parse a raw metadata blob into typed parameters.
///
/// Empty or whitespace-only input is valid and yields the canonical default
/// record: empty prompt and negative prompt, every optional field `None`, no
/// loras, and the title synthesized for an empty prompt with seed 0.
pub fn parse_parameters(raw: &str) -> ParsedParameters {
    let normalized = raw.replace("\r\n", "\n");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return default_record();
    }

    let (prompt_part, negative_part, meta_line) = split_blocks(normalized);
    let prompt = tidy(prompt_part);
    let negative_prompt = tidy(negative_part);

    let meta = MetaMap::parse(&meta_line);
    if meta.dropped() > 0 {
        tracing::debug!(
            "Dropped {} malformed settings fragment(s)",
            meta.dropped()
        );
    }

    let sampler = match (meta.get("Sampler"), meta.get("Schedule type")) {
        (Some(sampler), Some(schedule)) => Some(format!("{sampler} {schedule}")),
        (Some(sampler), None) => Some(sampler.to_string()),
        _ => None,
    };

    // Seed feeds the title, so resolve it first
    let seed = meta.get_i64("Seed");

    let freeu = meta.get("freeu_enabled").map(|enabled| FreeUConfig {
        enabled: enabled.eq_ignore_ascii_case("true"),
        b1: meta.get_f64("freeu_b1"),
        b2: meta.get_f64("freeu_b2"),
        s1: meta.get_f64("freeu_s1"),
        s2: meta.get_f64("freeu_s2"),
        start: meta.get_f64("freeu_start"),
        end: meta.get_f64("freeu_end"),
    });

    let loras = extract_loras(&prompt);
    let title = synthesize_title(&prompt, seed);

    ParsedParameters {
        title,
        prompt,
        negative_prompt,
        steps: meta.get_u32("Steps"),
        sampler,
        cfg: meta.get_f64("CFG scale"),
        seed,
        size: meta.get_string("Size"),
        model: meta.get_string("Model"),
        model_hash: meta.get_string("Model hash"),
        vae: meta.get_string("Module 1").or_else(|| meta.get_string("VAE")),
        version: meta.get_string("Version"),
        freeu,
        loras,
    }
}

/// The canonical record for images with no usable metadata.
fn default_record() -> ParsedParameters {
    ParsedParameters {
        title: synthesize_title("", None),
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
        loras: Vec::new(),
    }
}

/// Split the normalized blob on the two literal markers.
///
/// Returns (prompt segment, negative segment, reconstructed settings line).
/// When the negative marker is absent, the settings line is still recovered
/// from the prompt segment, so settings-only blocks parse.
fn split_blocks(text: &str) -> (&str, &str, String) {
    let rebuild = |rest: &str| format!("Steps: {}", rest.trim());
    match text.split_once(NEGATIVE_MARKER) {
        Some((prompt, rest)) => match rest.split_once(STEPS_MARKER) {
            Some((negative, meta)) => (prompt, negative, rebuild(meta)),
            None => (prompt, rest, String::new()),
        },
        None => match text.split_once(STEPS_MARKER) {
            Some((prompt, meta)) => (prompt, "", rebuild(meta)),
            None => (text, "", String::new()),
        },
    }
}

/// Normalize a prompt segment: trim, collapse whitespace around commas to
/// `", "`, and drop one trailing comma.
fn tidy(text: &str) -> String {
    let collapsed = COMMA_RUN.replace_all(text.trim(), ", ");
    let trimmed = collapsed.trim_end();
    trimmed.strip_suffix(',').unwrap_or(trimmed).to_string()
}

/// Explicit key-value mapping parsed from the settings line.
///
/// Typed accessors keep "key absent" and "key present but unparseable"
/// distinguishable: both come back as `None`, but only through the typed
/// parse, never by silently defaulting to zero.
#[derive(Debug, Default)]
struct MetaMap {
    entries: HashMap<String, String>,
    dropped: usize,
}

impl MetaMap {
    /// Split a settings line on commas into `key: value` entries.
    ///
    /// Later duplicates override earlier ones. Non-empty fragments without a
    /// `key: value` shape are counted and dropped.
    fn parse(line: &str) -> Self {
        let mut map = Self::default();
        for fragment in line.split(',') {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            match fragment.split_once(':') {
                Some((key, value)) if !key.trim().is_empty() => {
                    map.entries
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => map.dropped += 1,
            }
        }
        map
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Count of fragments dropped as malformed.
    fn dropped(&self) -> usize {
        self.dropped
    }
}
