#[path = "common/mod.rs"]
mod common;

use common::write_function_words;
use stylo::{feature_columns, load_function_words, FUNCTION_WORD_PREFIX, METADATA_COLUMNS, PUNCTUATION};

#[test]
fn function_words_load_sorted_lowercased_deduped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fw.txt");
    write_function_words(&path, &["zebra", "Apple", "", "  the ", "apple", "zebra"]);

    let words = load_function_words(&path).unwrap();
    assert_eq!(words, vec!["apple", "the", "zebra"]);
}

/// The feature header must be byte-identical across runs given the same
/// resource: no dependency on unordered iteration anywhere in assembly.
#[test]
fn feature_header_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fw.txt");
    write_function_words(&path, &["of", "the", "and"]);

    let a = feature_columns(&load_function_words(&path).unwrap());
    let b = feature_columns(&load_function_words(&path).unwrap());
    assert_eq!(a, b);
}

#[test]
fn feature_header_layout() {
    let words: Vec<String> = ["and", "of", "the"].iter().map(|s| s.to_string()).collect();
    let cols = feature_columns(&words);

    // fixed block, then fw block, then 26 letters + 10 digits + punctuation
    assert_eq!(cols.len(), 38 + words.len() + 26 + 10 + PUNCTUATION.len());
    assert_eq!(cols[0], "length_char");
    assert_eq!(cols[1], "length_words");
    assert_eq!(cols[2], "word_1");
    assert_eq!(cols[21], "word_20p");
    assert_eq!(cols[22], "all_upper");
    assert_eq!(cols[26], "other_case");
    assert_eq!(cols[27], "lego_1");
    assert_eq!(cols[36], "lego_10p");
    assert_eq!(cols[37], "yules_k");
    assert_eq!(cols[38], "fw_and");
    assert_eq!(cols[39], "fw_of");
    assert_eq!(cols[40], "fw_the");
    assert_eq!(cols[41], "a");
    assert_eq!(cols[41 + 26], "0");
    assert_eq!(cols[41 + 36], ".");
    assert_eq!(*cols.last().unwrap(), ">".to_string());

    for w in &words {
        assert!(cols.contains(&format!("{}{}", FUNCTION_WORD_PREFIX, w)));
    }
}

#[test]
fn metadata_columns_are_fixed() {
    assert_eq!(
        METADATA_COLUMNS,
        [
            "id",
            "subreddit_id",
            "subreddit",
            "author",
            "created_utc",
            "retrieved_on",
            "parent_id",
            "score",
            "gilded",
            "edited"
        ]
    );
}
