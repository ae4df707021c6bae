//! The record-acceptance rule shared by every pass: forum allow-list
//! membership and author validity. Pure functions of their inputs so both
//! output tables stay row-count-consistent.

use crate::record::CommentRecord;

/// Author sentinel left behind when an account is deleted.
pub const DELETED_AUTHOR: &str = "[deleted]";

/// Normalize a forum name for matching: trim, lowercase, strip a leading "r/".
#[inline]
pub fn normalize_forum(s: &str) -> String {
    let s = s.trim().to_lowercase();
    if let Some(rest) = s.strip_prefix("r/") { rest.to_string() } else { s }
}

/// Build the sorted, deduplicated allow-list used by `accept`.
/// Returns None when no names are given, which disables forum filtering.
pub fn resolve_allowlist<I, S>(forums: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut v: Vec<String> = forums
        .into_iter()
        .map(|s| normalize_forum(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    if v.is_empty() {
        return None;
    }
    v.sort();
    v.dedup();
    Some(v)
}

/// Accept iff the record's subreddit passes the allow-list (case-insensitive;
/// None allows any forum) and the author is present and not `[deleted]`.
/// `allowlist` must be the sorted output of `resolve_allowlist`.
pub fn accept(rec: &CommentRecord, allowlist: Option<&[String]>) -> bool {
    if let Some(targets) = allowlist {
        match rec.subreddit.as_deref().map(|s| s.to_lowercase()) {
            Some(s) if targets.binary_search(&s).is_ok() => {}
            _ => return false,
        }
    }
    match rec.author.as_deref() {
        Some(a) => !a.eq_ignore_ascii_case(DELETED_AUTHOR),
        None => false,
    }
}
