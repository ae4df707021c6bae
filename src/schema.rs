//! Frozen output schemas for the two tables.
//!
//! The feature-table header is computed once at startup from the fixed
//! feature names, one `fw_`-prefixed column per function word (sorted so the
//! header is byte-identical across runs), the lowercase alphabet, the digits,
//! and the fixed punctuation set.

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::util::open_with_backoff;

/// Metadata table columns, in output order.
pub const METADATA_COLUMNS: [&str; 10] = [
    "id",
    "subreddit_id",
    "subreddit",
    "author",
    "created_utc",
    "retrieved_on",
    "parent_id",
    "score",
    "gilded",
    "edited",
];

/// The fixed punctuation alphabet counted by the character tabulator and
/// emitted as per-character columns. Characters outside {a-z, 0-9, these}
/// are never counted.
pub const PUNCTUATION: [char; 32] = [
    '.', '?', '!', ',', ';', ':', '(', ')', '"', '-', '\'', '`', '~', '@', '#', '$',
    '%', '^', '&', '*', '_', '+', '=', '[', ']', '{', '}', '\\', '|', '/', '<', '>',
];

/// Column prefix for function-word counts, distinct from the single-character
/// columns so a one-letter function word cannot collide with a letter column.
pub const FUNCTION_WORD_PREFIX: &str = "fw_";

/// Load the function-word resource: one word per line, lowercased, blank
/// lines ignored, sorted + deduplicated so downstream column order is stable.
pub fn load_function_words(path: &Path) -> Result<Vec<String>> {
    let f = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open function-word list {}", path.display()))?;
    let r = BufReader::new(f);
    let mut words = Vec::new();
    for line in r.lines() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        let w = line.trim().to_lowercase();
        if !w.is_empty() {
            words.push(w);
        }
    }
    words.sort();
    words.dedup();
    Ok(words)
}

/// Assemble the feature-table header. `function_words` must already be sorted
/// (the output of `load_function_words`).
pub fn feature_columns(function_words: &[String]) -> Vec<String> {
    let mut cols = Vec::with_capacity(38 + function_words.len() + 26 + 10 + PUNCTUATION.len());
    cols.push("length_char".to_string());
    cols.push("length_words".to_string());
    for n in 1..=19 {
        cols.push(format!("word_{}", n));
    }
    cols.push("word_20p".to_string());
    for name in ["all_upper", "all_lower", "first_upper", "camel", "other_case"] {
        cols.push(name.to_string());
    }
    for n in 1..=9 {
        cols.push(format!("lego_{}", n));
    }
    cols.push("lego_10p".to_string());
    cols.push("yules_k".to_string());
    for w in function_words {
        cols.push(format!("{}{}", FUNCTION_WORD_PREFIX, w));
    }
    for c in 'a'..='z' {
        cols.push(c.to_string());
    }
    for c in '0'..='9' {
        cols.push(c.to_string());
    }
    for c in PUNCTUATION {
        cols.push(c.to_string());
    }
    cols
}
