//! Keyword-based tag inference over prompt text.
//!
//! A fixed, ordered checklist against the lowercased prompt; each matching
//! keyword emits its mapped tag in checklist order. No matches at all fall
//! back to a single "abstract" tag, so the tag list is never empty.

/// (keyword, alternative keyword, emitted tag), checked in order.
const TAG_RULES: [(&str, Option<&str>, &str); 6] = [
    ("geometric", None, "geometric"),
    ("organic", Some("flowing"), "flow"),
    ("gradient", None, "gradient"),
    ("minimal", None, "minimal"),
    ("monochrome", None, "monochrome"),
    ("pastel", None, "pastel"),
];

/// Fallback tag when no keyword matches.
const FALLBACK_TAG: &str = "abstract";

/// Infer tags for a prompt.
pub fn infer_tags(prompt: &str) -> Vec<String> {
    let lowered = prompt.to_lowercase();
    let tags: Vec<String> = TAG_RULES
        .iter()
        .filter(|(keyword, alt, _)| {
            lowered.contains(keyword) || alt.is_some_and(|a| lowered.contains(a))
        })
        .map(|(_, _, tag)| tag.to_string())
        .collect();

    if tags.is_empty() {
        vec![FALLBACK_TAG.to_string()]
    } else {
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_keywords_yields_exactly_abstract() {
        assert_eq!(infer_tags("a quiet seaside town at dusk"), vec!["abstract"]);
        assert_eq!(infer_tags(""), vec!["abstract"]);
    }

    #[test]
    fn tags_emit_in_checklist_order() {
        let tags = infer_tags("pastel gradient over geometric forms");
        assert_eq!(tags, vec!["geometric", "gradient", "pastel"]);
    }

    #[test]
    fn organic_and_flowing_both_map_to_flow() {
        assert_eq!(infer_tags("organic texture"), vec!["flow"]);
        assert_eq!(infer_tags("flowing ribbons"), vec!["flow"]);
        // both present still emits a single "flow"
        assert_eq!(infer_tags("organic flowing ribbons"), vec!["flow"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(infer_tags("MONOCHROME study"), vec!["monochrome"]);
    }
}
