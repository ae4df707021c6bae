#![allow(dead_code)]

use serde_json::json;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a compressed `.zst` file containing the provided JSONL lines.
/// This mirrors the corpus's RC_ monthly files but with tiny content.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Write a newline-delimited function-word resource.
pub fn write_function_words(path: &Path, words: &[&str]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for w in words {
        writeln!(&mut f, "{}", w).unwrap();
    }
}

/// One fully-populated comment line in corpus shape. Extra fields are present
/// so decoding exercises serde's unknown-field tolerance.
pub fn comment(id: &str, author: &str, subreddit: &str, body: &str, created_utc: i64) -> String {
    json!({
        "controversiality": 0, "body": body, "subreddit_id": "t5_x",
        "link_id": "t3_s1", "stickied": false, "subreddit": subreddit, "score": 2,
        "ups": 2, "author": author, "id": id, "edited": false, "parent_id": "t3_s1",
        "gilded": 0, "distinguished": null, "created_utc": created_utc,
        "retrieved_on": created_utc + 1000
    })
    .to_string()
}

/// Build a tiny corpus archive with:
/// - c1 by "alice" in r/nfl, the mixed-case body used by the feature tests
/// - c2 by "bob" in r/NFL (uppercase forum, tests case-insensitive allow-list)
/// - c3 by "[deleted]" in r/nfl (pseudo user, always filtered)
/// - c4 by "charlie" in r/nba (outside an {"nfl"} allow-list)
/// - c5 by "dana" in r/CFB (only reachable with no allow-list)
/// plus a `function_words.txt` resource next to it.
/// Returns (base_dir, archive_path, function_words_path).
pub fn make_corpus_basic() -> (PathBuf, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path();

    let archive = base.join("RC_2006-01.zst");
    let lines = vec![
        comment("c1", "alice", "nfl", "The Quick BROWN fox runDog", 1136073600),
        comment("c2", "bob", "NFL", "don't stop believing, hold on to that feeling", 1136073601),
        comment("c3", "[deleted]", "nfl", "this account is gone", 1136073602),
        comment("c4", "charlie", "nba", "the dunk of the year", 1136073603),
        comment("c5", "dana", "CFB", "fourth and long", 1136073604),
    ];
    write_zst_lines(&archive, &lines);

    let fw = base.join("function_words.txt");
    write_function_words(&fw, &["the", "of", "and", "on", "to"]);

    (base, archive, fw)
}

/// Read a CSV file into rows of strings, header included.
pub fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Index of a named column in a CSV header row.
pub fn col_idx(header: &[String], name: &str) -> usize {
    header
        .iter()
        .position(|c| c == name)
        .unwrap_or_else(|| panic!("column {} not in header", name))
}
