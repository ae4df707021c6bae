//! Line-level comment record schema.
//! Extra fields in the corpus are ignored by serde.

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

/// One decoded comment line. Every field is optional at decode time; presence
/// of the metadata subset is enforced by the projector, not the decoder.
/// NOTE: `edited` is polymorphic in the corpus (false, or an epoch number
/// once the comment was edited), so it is carried as a raw JSON value.
#[derive(Debug, Deserialize)]
pub struct CommentRecord {
    pub id: Option<String>,
    pub subreddit: Option<String>,
    pub subreddit_id: Option<String>,
    pub author: Option<String>,
    pub created_utc: Option<i64>,
    pub retrieved_on: Option<i64>,
    pub parent_id: Option<String>,
    pub score: Option<i64>,
    pub gilded: Option<i64>,
    pub edited: Option<Value>,
    pub body: Option<String>,
}

/// Parse a JSON line into `CommentRecord` using serde_json.
#[inline]
pub fn parse_record(line: &str) -> Result<CommentRecord> {
    Ok(serde_json::from_str(line)?)
}
