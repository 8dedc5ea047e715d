//! Per-file and run-level statistics plus output post-processing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-file processing statistics.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    /// Transcript path as given to the run.
    pub path: String,
    /// Characters in the raw transcript.
    pub chars_processed: u64,
    /// Sentences produced by segmentation.
    pub sentences_detected: u64,
    /// Whitespace tokens in the normalized text.
    pub words_detected: u64,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: u64,
    /// Processing status (success, skipped, failed).
    pub status: String,
    /// Error message if processing failed.
    pub error: Option<String>,
}

/// Aggregated statistics for one batch run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    pub total_files: u64,
    pub processed: u64,
    pub skipped: u64,
    pub failed: u64,
    pub total_chars: u64,
    pub total_sentences: u64,
    pub duration_ms: u64,
    pub files: Vec<FileStats>,
}

/// Write run statistics as pretty-printed JSON.
pub async fn write_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let json = serde_json::to_vec_pretty(stats).context("serializing run stats")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing run stats to {}", path.display()))?;
    Ok(())
}

/// Remove Persian and Latin commas from an output sentence.
///
/// Comma removal can leave a doubled space or a bare tail, so the result is
/// re-collapsed and trimmed.
pub fn strip_commas(text: &str) -> String {
    let stripped = text.replace(['،', ','], "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
