//! Async transcript reading.
//!
//! Transcripts are single small text files, so reads are whole-file rather
//! than line-streamed; per-file statistics and the fail-fast/continue policy
//! mirror the rest of the pipeline.

use anyhow::Result;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Configuration for transcript reading behavior.
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Whether to fail fast on the first read error or continue.
    pub fail_fast: bool,
}

/// Statistics for one transcript read.
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub chars_read: u64,
    pub bytes_read: u64,
    pub read_error: Option<String>,
}

/// Async whole-file transcript reader.
pub struct AsyncTranscriptReader {
    config: ReaderConfig,
}

impl AsyncTranscriptReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a transcript to a UTF-8 string.
    ///
    /// With `fail_fast` disabled, open/decode errors yield an empty string
    /// plus stats carrying the error, so a batch run can continue.
    pub async fn read_transcript<P: AsRef<Path>>(&self, path: P) -> Result<(String, ReadStats)> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading transcript");

        match fs::read_to_string(path).await {
            Ok(content) => {
                let stats = ReadStats {
                    file_path: path.display().to_string(),
                    chars_read: content.chars().count() as u64,
                    bytes_read: content.len() as u64,
                    read_error: None,
                };
                Ok((content, stats))
            }
            Err(error) => {
                let message = format!("failed to read {}: {}", path.display(), error);
                warn!("{message}");
                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(message));
                }
                let stats = ReadStats {
                    file_path: path.display().to_string(),
                    chars_read: 0,
                    bytes_read: 0,
                    read_error: Some(message),
                };
                Ok((String::new(), stats))
            }
        }
    }
}
