//! Inline LoRA directive extraction.
//!
//! Prompts reference style adapters inline as `<lora:name:weight>`. The
//! extractor collects them for the manifest but leaves the directives in the
//! stored prompt text untouched.

use std::sync::LazyLock;

use regex::Regex;

static LORA_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<lora:([^:>]+):([^>]+)>").unwrap());

/// Collect every `<lora:name:weight>` directive as `"name:weight"`, in order
/// of appearance, duplicates preserved.
pub fn extract_loras(prompt: &str) -> Vec<String> {
    LORA_DIRECTIVE
        .captures_iter(prompt)
        .map(|caps| format!("{}:{}", &caps[1], &caps[2]))
        .collect()
}
