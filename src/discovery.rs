//! Transcript file discovery.
//!
//! Finds `*.txt` transcripts recursively under a root directory, skipping the
//! outputs this tool generates so a rerun never treats its own sentence files
//! as input.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::incremental::SENTENCES_SUFFIX;

/// Configuration for file discovery behavior.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on the first traversal error or continue.
    pub fail_fast: bool,
}

/// A discovered transcript file.
#[derive(Debug, Clone)]
pub struct TranscriptFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// True for `*.txt` files that are not generated sentence outputs.
pub fn is_transcript_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".txt") && !name.ends_with(SENTENCES_SUFFIX)
}

/// Collect transcript files under `root`, sorted by path for deterministic
/// processing order.
pub async fn collect_transcript_files(
    root: &Path,
    config: DiscoveryConfig,
) -> Result<Vec<TranscriptFile>> {
    let root = root.to_path_buf();
    // WHY: walkdir is blocking; keep the traversal off the async runtime
    task::spawn_blocking(move || walk_transcripts(&root, &config))
        .await
        .context("discovery task failed")?
}

fn walk_transcripts(root: &Path, config: &DiscoveryConfig) -> Result<Vec<TranscriptFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) if entry.file_type().is_file() && is_transcript_file(entry.path()) => {
                let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                debug!(path = %entry.path().display(), size_bytes, "found transcript");
                files.push(TranscriptFile {
                    path: entry.path().to_path_buf(),
                    size_bytes,
                });
            }
            Ok(_) => {}
            Err(error) => {
                if config.fail_fast {
                    return Err(error).context("directory traversal failed");
                }
                warn!(%error, "skipping unreadable directory entry");
            }
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
