mod config;
mod zstd_jsonl;
mod record;
mod filters;
mod tokenize;
mod features;
mod schema;
mod csv_out;
mod metadata;
mod pipeline;

mod progress;
mod mem;
mod util;

pub use crate::config::ExtractOptions;
pub use crate::pipeline::{ExtractReport, StyloETL};

pub use crate::record::{parse_record, CommentRecord};
pub use crate::filters::{accept, normalize_forum, resolve_allowlist, DELETED_AUTHOR};
pub use crate::tokenize::{char_class_counts, word_tokens};
pub use crate::features::{CaseShape, FeatureBundle};
pub use crate::metadata::MetadataRow;

// Expose the frozen schemas so downstream consumers can pin column layouts.
pub use crate::schema::{
    feature_columns, load_function_words, FUNCTION_WORD_PREFIX, METADATA_COLUMNS, PUNCTUATION,
};
pub use crate::csv_out::SchemaWriter;

// Expose the raw archive streamer for callers that run their own passes.
pub use crate::zstd_jsonl::{for_each_line_cfg, for_each_line_with_progress_cfg, LineAction};

// Expose memory helpers for adaptive throttling from the binary.
pub use crate::mem::{available_memory_fraction, is_low_memory};

// Export robust file ops from util so binaries can import from crate root.
pub use crate::util::{create_with_backoff, init_tracing_once, open_with_backoff, replace_file_atomic_backoff};
