//! Streaming line reader for a zstd-compressed JSONL archive.
//!
//! Unlike a multi-file corpus scan, a single archive *is* the whole job, so
//! open/decode failures are fatal and propagate to the caller rather than
//! being skipped.

use anyhow::{Context, Result};
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use zstd::stream::read::Decoder;

use crate::mem::maybe_throttle_low_memory;
use crate::util::open_with_backoff;

/// Per-line control flow: keep streaming, or stop at this record boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineAction {
    Continue,
    Stop,
}

/// Stream the archive line-by-line; call `on_line` with the raw line
/// (trailing `\r?\n` stripped). `read_buf_bytes` sets the BufReader capacity.
///
/// `window_log_max(31)` is requested up front to avoid "Frame requires too
/// much memory" on very large frames.
pub fn for_each_line_cfg(
    path: &Path,
    read_buf_bytes: usize,
    mut on_line: impl FnMut(&str) -> Result<LineAction>,
) -> Result<()> {
    for_each_line_inner(path, read_buf_bytes, &mut |_| {}, &mut on_line)
}

/// Same as `for_each_line_cfg` but calls `on_progress(delta_bytes)` with the
/// number of **compressed** bytes consumed since the previous line, so a
/// byte-based progress bar tracks the archive accurately.
pub fn for_each_line_with_progress_cfg(
    path: &Path,
    read_buf_bytes: usize,
    mut on_progress: impl FnMut(u64),
    mut on_line: impl FnMut(&str) -> Result<LineAction>,
) -> Result<()> {
    for_each_line_inner(path, read_buf_bytes, &mut on_progress, &mut on_line)
}

/// A `Read` wrapper that counts compressed bytes read.
struct CountingReader<R: Read> {
    inner: R,
    counter: Arc<AtomicU64>,
}
impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

fn for_each_line_inner(
    path: &Path,
    read_buf_bytes: usize,
    on_progress: &mut impl FnMut(u64),
    on_line: &mut impl FnMut(&str) -> Result<LineAction>,
) -> Result<()> {
    let file = open_with_backoff(path, 16, 50)
        .with_context(|| format!("open archive {}", path.display()))?;
    let counter = Arc::new(AtomicU64::new(0));
    let cnt = CountingReader { inner: file, counter: counter.clone() };

    let mut decoder = Decoder::new(cnt)
        .with_context(|| format!("not a valid zstd stream: {}", path.display()))?;
    decoder.window_log_max(31)?;
    let mut reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), decoder);

    let mut buf = String::with_capacity(16 * 1024);
    let mut last = 0u64;
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("decode {}", path.display()))?;
        if n == 0 {
            let cur = counter.load(Ordering::Relaxed);
            if cur > last {
                on_progress(cur - last);
            }
            break;
        }
        if buf.ends_with('\n') {
            let _ = buf.pop();
            if buf.ends_with('\r') { let _ = buf.pop(); }
        }
        let cur = counter.load(Ordering::Relaxed);
        if cur > last {
            on_progress(cur - last);
            last = cur;
        }
        if on_line(&buf)? == LineAction::Stop {
            break;
        }
        // Cooperative memory backoff
        maybe_throttle_low_memory(0.10);
    }
    Ok(())
}
