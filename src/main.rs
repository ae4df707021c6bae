use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use stylo::StyloETL;

const DEFAULT_FUNCTION_WORDS: &str = "function_words.txt";

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let archive = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: stylo <archive.zst> [forum ...]"))?;
    let forums: Vec<String> = args.collect();

    let function_words = std::env::var("STYLO_FUNCTION_WORDS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_FUNCTION_WORDS));

    let stem = output_stem(&archive);
    let metadata_out = PathBuf::from(format!("{}_metadata.csv", stem));
    let features_out = PathBuf::from(format!("{}_features.csv", stem));

    let report = StyloETL::new()
        .archive(&archive)
        .forums(&forums)
        .function_words(&function_words)
        .progress(true)
        .progress_label("Extracting stylometric features")
        .extract_to(&metadata_out, &features_out)?;

    println!(
        "{} rows -> {} and {} ({} rejected by filter, {} malformed, {} missing fields)",
        report.rows_written,
        metadata_out.display(),
        features_out.display(),
        report.rejected_filter,
        report.skipped_parse,
        report.skipped_missing_field,
    );
    Ok(())
}

fn output_stem(archive: &Path) -> String {
    archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "stylo".to_string())
}
