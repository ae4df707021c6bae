//! The extraction pipeline: a builder facade over one streaming pass that
//! decodes, filters, and fans accepted records out to the metadata and/or
//! feature writers.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use std::sync::atomic::Ordering;

use crate::config::ExtractOptions;
use crate::csv_out::SchemaWriter;
use crate::features::FeatureBundle;
use crate::filters::accept;
use crate::metadata::MetadataRow;
use crate::progress::make_progress_bar_labeled;
use crate::record::parse_record;
use crate::schema::{feature_columns, load_function_words, METADATA_COLUMNS};
use crate::util::init_tracing_once;
use crate::zstd_jsonl::{for_each_line_with_progress_cfg, LineAction};

#[derive(Clone)]
pub struct StyloETL {
    pub(crate) opts: ExtractOptions,
}

/// Per-run accounting, returned by every pass and logged at info.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractReport {
    pub lines_read: u64,
    pub rows_written: u64,
    pub rejected_filter: u64,
    pub skipped_parse: u64,
    pub skipped_missing_field: u64,
    pub cancelled: bool,
}

impl StyloETL {
    pub fn new() -> Self {
        Self { opts: ExtractOptions::new() }
    }

    // -------- Builder methods --------
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_archive(path); self }
    pub fn forum(mut self, forum: impl AsRef<str>) -> Self { self.opts = self.opts.with_forums([forum.as_ref()]); self }
    pub fn forums<I, S>(mut self, forums: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> { self.opts = self.opts.with_forums(forums); self }
    pub fn function_words(mut self, path: impl AsRef<Path>) -> Self { self.opts = self.opts.with_function_words(path); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }
    pub fn timestamps_human_readable(mut self, yes: bool) -> Self { self.opts = self.opts.with_human_timestamps(yes); self }
    pub fn cancel_flag(mut self, flag: std::sync::Arc<std::sync::atomic::AtomicBool>) -> Self { self.opts = self.opts.with_cancel_flag(flag); self }

    // -------- Operations --------

    /// The combined pass: read the archive once, fan accepted records out to
    /// both tables. Keeps the two outputs row-count-consistent by
    /// construction.
    pub fn extract_to(self, metadata_out: &Path, features_out: &Path) -> Result<ExtractReport> {
        self.run_pass(Some(metadata_out), Some(features_out))
    }

    /// Metadata table only. Independent of the feature pass; no shared state.
    pub fn metadata_to(self, out: &Path) -> Result<ExtractReport> {
        self.run_pass(Some(out), None)
    }

    /// Feature table only. Applies the same acceptance and field-validity
    /// gates as the metadata pass, in the same record order, so a separate
    /// metadata run over the same archive produces the same row count.
    pub fn features_to(self, out: &Path) -> Result<ExtractReport> {
        self.run_pass(None, Some(out))
    }

    fn run_pass(self, metadata_out: Option<&Path>, features_out: Option<&Path>) -> Result<ExtractReport> {
        init_tracing_once();
        let opts = self.opts;
        let archive = opts.archive.clone().ok_or_else(|| anyhow!("archive path is required"))?;

        let mut meta_writer = match metadata_out {
            Some(path) => Some(SchemaWriter::create(
                path,
                METADATA_COLUMNS.iter().map(|c| c.to_string()).collect(),
                opts.write_buffer_bytes,
            )?),
            None => None,
        };
        let mut feat_writer = None;
        let mut function_words: Vec<String> = Vec::new();
        if let Some(path) = features_out {
            function_words = load_function_words(&opts.function_words_path)?;
            feat_writer = Some(SchemaWriter::create(
                path,
                feature_columns(&function_words),
                opts.write_buffer_bytes,
            )?);
        }

        let total_bytes = fs::metadata(&archive)
            .with_context(|| format!("stat {}", archive.display()))?
            .len();
        let pb = if opts.progress {
            Some(make_progress_bar_labeled(total_bytes, opts.progress_label.as_deref()))
        } else {
            None
        };

        let allowlist = opts.forums.as_deref();
        let human_ts = opts.human_readable_timestamps;
        let mut report = ExtractReport::default();

        for_each_line_with_progress_cfg(
            &archive,
            opts.read_buffer_bytes,
            |delta| {
                if let Some(pb) = &pb {
                    pb.inc(delta);
                }
            },
            |line| {
                if let Some(flag) = &opts.cancel {
                    if flag.load(Ordering::Relaxed) {
                        report.cancelled = true;
                        return Ok(LineAction::Stop);
                    }
                }
                report.lines_read += 1;

                let rec = match parse_record(line) {
                    Ok(rec) => rec,
                    Err(e) => {
                        report.skipped_parse += 1;
                        tracing::warn!("skipping malformed record at line {}: {}", report.lines_read, e);
                        return Ok(LineAction::Continue);
                    }
                };
                if !accept(&rec, allowlist) {
                    report.rejected_filter += 1;
                    return Ok(LineAction::Continue);
                }

                // The projector doubles as the field-validity gate in every
                // pass (features-only included) so independent passes skip
                // the same records and stay row-count-consistent.
                let meta = match MetadataRow::project(&rec, human_ts) {
                    Ok(meta) => meta,
                    Err(e) => {
                        report.skipped_missing_field += 1;
                        tracing::warn!("skipping record at line {}: {}", report.lines_read, e);
                        return Ok(LineAction::Continue);
                    }
                };
                let body = match rec.body.as_deref() {
                    Some(body) => body,
                    None => {
                        report.skipped_missing_field += 1;
                        tracing::warn!("skipping record at line {}: record missing field `body`", report.lines_read);
                        return Ok(LineAction::Continue);
                    }
                };

                if let Some(w) = &mut meta_writer {
                    w.write_row(|col| meta.value(col))?;
                }
                if let Some(w) = &mut feat_writer {
                    let bundle = FeatureBundle::compute(body, &function_words);
                    w.write_row(|col| bundle.value(col))?;
                }
                report.rows_written += 1;
                Ok(LineAction::Continue)
            },
        )?;

        if let Some(pb) = &pb {
            pb.finish_with_message(if report.cancelled { "cancelled" } else { "done" });
        }

        if report.cancelled {
            tracing::warn!(
                "pass cancelled after {} rows; leaving truncated .tmp outputs unpromoted",
                report.rows_written
            );
            if let Some(w) = meta_writer {
                w.abandon()?;
            }
            if let Some(w) = feat_writer {
                w.abandon()?;
            }
        } else {
            if let Some(w) = meta_writer {
                w.finish()?;
            }
            if let Some(w) = feat_writer {
                w.finish()?;
            }
            tracing::info!(
                "pass complete: {} rows written, {} rejected by filter, {} malformed, {} missing fields",
                report.rows_written,
                report.rejected_filter,
                report.skipped_parse,
                report.skipped_missing_field
            );
        }
        Ok(report)
    }
}

impl Default for StyloETL {
    fn default() -> Self {
        Self::new()
    }
}
