//! Deterministic title synthesis.
//!
//! Every image gets a display title derived purely from its prompt and seed:
//! a thematic component from a fixed keyword checklist over the prompt, and a
//! variation component indexing fixed shape/mood vocabularies by the seed.
//! No randomness and no external state; the same inputs always produce the
//! same title.

/// Thematic keyword checklist, checked in order. The second entry of a pair
/// is an alternative keyword mapping to the same label.
const THEMES: [(&str, Option<&str>, &str); 5] = [
    ("geometric", None, "Geometric"),
    ("organic", Some("flowing"), "Flowing"),
    ("gradient", None, "Gradient"),
    ("minimal", None, "Minimal"),
    ("abstract", None, "Abstract"),
];

/// Shape vocabulary, indexed by `seed mod 6`.
const SHAPES: [&str; 6] = [
    "Silent Patterns",
    "Layered Forms",
    "Soft Waves",
    "Abstract Curves",
    "Geometric Balance",
    "Flowing Geometry",
];

/// Mood vocabulary, indexed by `floor(seed / 10) mod 6`.
const MOODS: [&str; 6] = ["Calm", "Dynamic", "Muted", "Refined", "Minimal", "Modern"];

/// Synthesize the display title for a (prompt, seed) pair.
///
/// A missing seed counts as 0, so metadata-less images all land on
/// `"Abstract Composition – Silent Patterns Calm #0"`.
pub fn synthesize_title(prompt: &str, seed: Option<i64>) -> String {
    let seed = seed.unwrap_or(0);
    format!("{} – {}", thematic(prompt), variation(seed))
}

/// Thematic component: collected checklist labels, or the fixed fallback.
fn thematic(prompt: &str) -> String {
    let lowered = prompt.to_lowercase();
    let labels: Vec<&str> = THEMES
        .iter()
        .filter(|(keyword, alt, _)| {
            lowered.contains(keyword) || alt.is_some_and(|a| lowered.contains(a))
        })
        .map(|(_, _, label)| *label)
        .collect();

    if labels.is_empty() {
        "Abstract Composition".to_string()
    } else {
        labels.join(" ")
    }
}

/// Variation component: seed-indexed shape and mood plus the seed itself.
///
/// Euclidean remainders keep the indices in range for negative seeds.
fn variation(seed: i64) -> String {
    let shape = SHAPES[seed.rem_euclid(SHAPES.len() as i64) as usize];
    let mood = MOODS[seed.div_euclid(10).rem_euclid(MOODS.len() as i64) as usize];
    format!("{shape} {mood} #{seed}")
}
