//! CSV writer bound to a frozen column schema.
//!
//! The header is written exactly once at creation; each row is serialized
//! against the schema with absent columns defaulting to 0 so downstream
//! parsing stays type-stable. Output is staged at `<path>.tmp` and promoted
//! atomically on `finish`, so an interrupted run leaves either a complete
//! table or an obviously-truncated temp file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::util::{create_with_backoff, replace_file_atomic_backoff};

pub struct SchemaWriter {
    columns: Vec<String>,
    dest: PathBuf,
    tmp: PathBuf,
    w: Option<csv::Writer<BufWriter<File>>>,
    rows: u64,
}

impl SchemaWriter {
    /// Create the staged output file and write the header row.
    pub fn create(path: &Path, columns: Vec<String>, buf_bytes: usize) -> Result<Self> {
        let tmp = tmp_path(path);
        let f = create_with_backoff(&tmp, 16, 50)
            .with_context(|| format!("create {}", tmp.display()))?;
        let mut w = csv::Writer::from_writer(BufWriter::with_capacity(buf_bytes.max(8 * 1024), f));
        w.write_record(&columns)
            .with_context(|| format!("write header {}", tmp.display()))?;
        Ok(Self {
            columns,
            dest: path.to_path_buf(),
            tmp,
            w: Some(w),
            rows: 0,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Write one row. `value` is consulted per schema column; None becomes "0".
    pub fn write_row<F>(&mut self, value: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(w) = &mut self.w {
            w.write_record(
                self.columns
                    .iter()
                    .map(|c| value(c).unwrap_or_else(|| "0".to_string())),
            )
            .with_context(|| format!("write row {}", self.tmp.display()))?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Flush and atomically promote the temp file to the final path.
    pub fn finish(mut self) -> Result<()> {
        if let Some(mut w) = self.w.take() {
            w.flush().with_context(|| format!("flush {}", self.tmp.display()))?;
        }
        replace_file_atomic_backoff(&self.tmp, &self.dest)
    }

    /// Flush what was written and leave the `.tmp` in place, unpromoted.
    /// Used on cancellation so partial output is recognizably truncated.
    pub fn abandon(mut self) -> Result<()> {
        if let Some(mut w) = self.w.take() {
            w.flush().with_context(|| format!("flush {}", self.tmp.display()))?;
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}
