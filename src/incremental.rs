//! Incremental processing utilities: derived output paths, existence checks,
//! and output writers used by the CLI and tests.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::analysis::TextAnalysis;

/// Suffix of the one-sentence-per-line output file.
pub const SENTENCES_SUFFIX: &str = "_sents.txt";

/// Suffix of the analysis record output file.
pub const ANALYSIS_SUFFIX: &str = "_analysis.json";

fn derived_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("transcript");
    let mut path = source.to_path_buf();
    path.set_file_name(format!("{stem}{suffix}"));
    path
}

/// Path of the sentences file derived from a transcript path.
pub fn sentences_file_path(source: &Path) -> PathBuf {
    derived_path(source, SENTENCES_SUFFIX)
}

/// Path of the analysis JSON file derived from a transcript path.
pub fn analysis_file_path(source: &Path) -> PathBuf {
    derived_path(source, ANALYSIS_SUFFIX)
}

/// True when both outputs for a transcript already exist.
pub fn outputs_exist(source: &Path) -> bool {
    sentences_file_path(source).exists() && analysis_file_path(source).exists()
}

/// Write the sentences file, one sentence per line with a trailing newline.
pub fn write_sentences_file(source: &Path, sentences: &[String]) -> io::Result<PathBuf> {
    let path = sentences_file_path(source);
    let mut content = sentences.join("\n");
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(&path, content)?;
    Ok(path)
}

/// Write the analysis record as pretty-printed JSON.
pub fn write_analysis_file(source: &Path, analysis: &TextAnalysis) -> Result<PathBuf> {
    let path = analysis_file_path(source);
    let json = serde_json::to_string_pretty(analysis).context("serializing analysis record")?;
    fs::write(&path, json)
        .with_context(|| format!("writing analysis file {}", path.display()))?;
    Ok(path)
}

/// Read a previously written sentences file.
pub fn read_sentences_file(source: &Path) -> io::Result<String> {
    fs::read_to_string(sentences_file_path(source))
}
