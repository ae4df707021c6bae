//! Projection of the fixed metadata field subset from an accepted record.

use anyhow::{anyhow, Result};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::record::CommentRecord;
use crate::schema::METADATA_COLUMNS;

/// One metadata row, values aligned with `schema::METADATA_COLUMNS`.
#[derive(Clone, Debug)]
pub struct MetadataRow {
    values: [String; 10],
}

impl MetadataRow {
    /// Project the fixed field subset, unmodified. Errors if any required
    /// field is absent; callers decide whether that skips or aborts.
    /// With `human_timestamps`, numeric time fields render as RFC3339
    /// ("edited" only when it carries an epoch, not a bool).
    pub fn project(rec: &CommentRecord, human_timestamps: bool) -> Result<Self> {
        let text = |v: &Option<String>, name: &str| -> Result<String> {
            v.clone().ok_or_else(|| anyhow!("record missing field `{}`", name))
        };
        let num = |v: Option<i64>, name: &str| -> Result<String> {
            v.map(|n| n.to_string())
                .ok_or_else(|| anyhow!("record missing field `{}`", name))
        };
        let ts = |v: Option<i64>, name: &str| -> Result<String> {
            let n = v.ok_or_else(|| anyhow!("record missing field `{}`", name))?;
            Ok(render_timestamp(n, human_timestamps))
        };

        let edited = match &rec.edited {
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(v) => render_timestamp(v, human_timestamps),
                None => n.to_string(),
            },
            _ => return Err(anyhow!("record missing field `edited`")),
        };

        Ok(Self {
            values: [
                text(&rec.id, "id")?,
                text(&rec.subreddit_id, "subreddit_id")?,
                text(&rec.subreddit, "subreddit")?,
                text(&rec.author, "author")?,
                ts(rec.created_utc, "created_utc")?,
                ts(rec.retrieved_on, "retrieved_on")?,
                text(&rec.parent_id, "parent_id")?,
                num(rec.score, "score")?,
                num(rec.gilded, "gilded")?,
                edited,
            ],
        })
    }

    /// Value for one metadata column, by name.
    pub fn value(&self, col: &str) -> Option<String> {
        METADATA_COLUMNS
            .iter()
            .position(|c| *c == col)
            .map(|i| self.values[i].clone())
    }
}

fn render_timestamp(epoch: i64, human: bool) -> String {
    if human {
        if let Ok(dt) = OffsetDateTime::from_unix_timestamp(epoch) {
            if let Ok(s) = dt.format(&Rfc3339) {
                return s;
            }
        }
    }
    epoch.to_string()
}
