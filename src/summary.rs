//! Summary extraction from paper abstracts.
//!
//! CrossRef abstracts often arrive wrapped in JATS XML tags. Stripping is a
//! plain "remove anything between angle brackets" pass; no entity decoding
//! (`&amp;` is left as-is) and no structural parse.

use regex::Regex;
use std::sync::LazyLock;

/// Fallback text when a paper has no usable abstract.
pub const NO_ABSTRACT: &str = "No abstract available.";

/// Maximum summary length in characters.
const MAX_SUMMARY_LEN: usize = 300;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
// Sentence boundary: terminator, whitespace, then an uppercase letter.
// The uppercase requirement avoids splitting on abbreviations like "e.g.".
static SENTENCE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+[A-Z]").expect("valid boundary regex"));

/// Remove HTML/XML tags from text and collapse whitespace.
pub fn strip_markup(text: &str) -> String {
    let clean = TAG_RE.replace_all(text, " ");
    WHITESPACE_RE.replace_all(&clean, " ").trim().to_string()
}

/// Extract the first sentence of an abstract as a one-sentence summary.
///
/// Returns [`NO_ABSTRACT`] when the abstract is empty or strips to nothing.
/// The result always ends in `.`, `!`, or `?` and is capped at 300 chars.
pub fn extract_summary(abstract_text: &str) -> String {
    if abstract_text.trim().is_empty() {
        return NO_ABSTRACT.to_string();
    }

    let clean = strip_markup(abstract_text);
    if clean.is_empty() {
        return NO_ABSTRACT.to_string();
    }

    // Split after the first sentence terminator that is followed by
    // whitespace and an uppercase letter. An abstract with no such boundary
    // (e.g. all lowercase) is returned whole.
    let mut first_sentence = match SENTENCE_BOUNDARY_RE.find(&clean) {
        Some(m) => clean[..=m.start()].to_string(),
        None => clean,
    };

    if !first_sentence.ends_with(['.', '!', '?']) {
        first_sentence.push('.');
    }

    if first_sentence.chars().count() > MAX_SUMMARY_LEN {
        first_sentence = first_sentence
            .chars()
            .take(MAX_SUMMARY_LEN - 3)
            .collect::<String>()
            + "...";
    }

    first_sentence
}
