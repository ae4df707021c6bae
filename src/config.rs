use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::filters::resolve_allowlist;

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ExtractOptions {
    pub archive: Option<PathBuf>,        // the .zst comment archive
    pub forums: Option<Vec<String>>,     // normalized lowercase allow-list; None = all
    pub function_words_path: PathBuf,    // newline-delimited word resource
    pub progress: bool,                  // show progress bar
    pub progress_label: Option<String>,  // optional label for progress bar

    // IO tuning
    pub read_buffer_bytes: usize,        // BufReader capacity
    pub write_buffer_bytes: usize,       // BufWriter capacity

    // output formatting
    pub human_readable_timestamps: bool, // convert unix timestamps to RFC3339 strings

    // checked at each record boundary; set true to stop the pass
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        // Defaults chosen to be safe but noticeably faster than std defaults.
        Self {
            archive: None,
            forums: None,
            function_words_path: PathBuf::from("function_words.txt"),
            progress: true,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
            human_readable_timestamps: false,
            cancel: None,
        }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }
    pub fn with_forums<I, S>(mut self, forums: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.forums = resolve_allowlist(forums);
        self
    }
    pub fn with_function_words(mut self, path: impl AsRef<Path>) -> Self {
        self.function_words_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_human_timestamps(mut self, yes: bool) -> Self {
        self.human_readable_timestamps = yes;
        self
    }
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}
