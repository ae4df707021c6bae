//! Word and character tokenization of comment bodies.

use ahash::AHashMap;
use regex::Regex;
use std::sync::OnceLock;

use crate::schema::PUNCTUATION;

// Word-character runs, or runs of anything else that isn't whitespace.
// Punctuation (including contraction apostrophes) separates tokens:
// "don't" segments as ["don", "'", "t"].
static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_re() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(r"\w+|[^\w\s]+").unwrap())
}

/// Split a body into word tokens, keeping only tokens composed solely of
/// alphanumeric characters (pure-punctuation and `_`-bearing segments drop).
/// Returns index-aligned original-case and lowercased token vectors.
pub fn word_tokens(text: &str) -> (Vec<&str>, Vec<String>) {
    let mut tokens = Vec::new();
    let mut lower = Vec::new();
    for m in word_re().find_iter(text) {
        let t = m.as_str();
        if !t.is_empty() && t.chars().all(|c| c.is_alphanumeric()) {
            tokens.push(t);
            lower.push(t.to_lowercase());
        }
    }
    (tokens, lower)
}

#[inline]
fn in_char_class(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || PUNCTUATION.contains(&c)
}

/// Tabulate per-character frequencies over the lowercased body for the fixed
/// class {a-z, 0-9, punctuation}. Not word-aware: characters inside numbers,
/// contractions, and punctuation runs all count. Anything outside the class
/// (other symbols, non-Latin scripts) is ignored.
pub fn char_class_counts(text: &str) -> AHashMap<char, u64> {
    let mut counts = AHashMap::new();
    for c in text.to_lowercase().chars() {
        if in_char_class(c) {
            *counts.entry(c).or_insert(0) += 1;
        }
    }
    counts
}
