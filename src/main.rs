use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use goftar::analysis::TextAnalyzer;
use goftar::discovery::{self, DiscoveryConfig, TranscriptFile};
use goftar::incremental;
use goftar::normalizer::NormalizerConfig;
use goftar::reader::{AsyncTranscriptReader, ReaderConfig};
use goftar::report::{self, FileStats, RunStats};
use goftar::segmenter::SegmenterConfig;

#[derive(Parser, Debug)]
#[command(name = "goftar")]
#[command(about = "Persian transcript normalizer and sentence segmenter")]
#[command(version)]
struct Args {
    /// Transcript file, or directory to scan for *.txt transcripts
    input: PathBuf,

    /// Reprocess transcripts even when output files already exist
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress the console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Remove Persian and Latin commas from the written sentences
    #[arg(long)]
    strip_commas: bool,

    /// Disable the typography rules (collapsing, ZWNJ insertion, guillemets)
    #[arg(long)]
    plain: bool,

    /// Words per chunk when punctuation-free text is split by length
    #[arg(long, default_value_t = 18)]
    chunk_words: usize,

    /// Window used when re-splitting overlong sentences
    #[arg(long, default_value_t = 22)]
    resplit_words: usize,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging keeps batch runs machine-inspectable
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "starting goftar");

    if !args.input.exists() {
        anyhow::bail!("Input path does not exist: {}", args.input.display());
    }

    let run_start = Instant::now();

    let files: Vec<TranscriptFile> = if args.input.is_file() {
        let size_bytes = tokio::fs::metadata(&args.input).await?.len();
        vec![TranscriptFile {
            path: args.input.clone(),
            size_bytes,
        }]
    } else {
        let config = DiscoveryConfig {
            fail_fast: args.fail_fast,
        };
        discovery::collect_transcript_files(&args.input, config).await?
    };

    info!("discovered {} transcript file(s)", files.len());
    println!(
        "goftar v{} - found {} transcript file(s)",
        env!("CARGO_PKG_VERSION"),
        files.len()
    );

    let normalizer_config = NormalizerConfig {
        typography: !args.plain,
        guillemets: !args.plain,
        ..NormalizerConfig::default()
    };
    let segmenter_config = SegmenterConfig {
        fallback_chunk_words: args.chunk_words,
        resplit_window_words: args.resplit_words,
        ..SegmenterConfig::default()
    };
    let analyzer = TextAnalyzer::with_configs(normalizer_config, segmenter_config)?;
    let transcript_reader = AsyncTranscriptReader::new(ReaderConfig {
        fail_fast: args.fail_fast,
    });

    let progress = if args.no_progress || files.is_empty() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut file_stats = Vec::with_capacity(files.len());
    let mut processed = 0u64;
    let mut skipped = 0u64;
    let mut failed = 0u64;
    let mut total_chars = 0u64;
    let mut total_sentences = 0u64;

    for file in &files {
        let file_start = Instant::now();
        progress.set_message(
            file.path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string(),
        );

        if !args.overwrite_all && incremental::outputs_exist(&file.path) {
            info!(path = %file.path.display(), "outputs exist, skipping");
            skipped += 1;
            file_stats.push(FileStats {
                path: file.path.display().to_string(),
                chars_processed: 0,
                sentences_detected: 0,
                words_detected: 0,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
                status: "skipped".to_string(),
                error: None,
            });
            progress.inc(1);
            continue;
        }

        match process_transcript(&analyzer, &transcript_reader, file, args.strip_commas).await {
            Ok(stats) => {
                total_chars += stats.chars_processed;
                total_sentences += stats.sentences_detected;
                processed += 1;
                file_stats.push(stats);
            }
            Err(error) => {
                if args.fail_fast {
                    return Err(error);
                }
                warn!(path = %file.path.display(), %error, "processing failed, continuing");
                failed += 1;
                file_stats.push(FileStats {
                    path: file.path.display().to_string(),
                    chars_processed: 0,
                    sentences_detected: 0,
                    words_detected: 0,
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                    status: "failed".to_string(),
                    error: Some(error.to_string()),
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let run_stats = RunStats {
        total_files: files.len() as u64,
        processed,
        skipped,
        failed,
        total_chars,
        total_sentences,
        duration_ms: run_start.elapsed().as_millis() as u64,
        files: file_stats,
    };
    report::write_run_stats(&args.stats_out, &run_stats).await?;

    println!("Processing complete:");
    println!("  Processed: {processed} file(s)");
    if skipped > 0 {
        println!("  Skipped (outputs exist): {skipped}");
    }
    if failed > 0 {
        println!("  Failed: {failed}");
    }
    println!("  Total sentences: {total_sentences}");
    println!("  Stats written to: {}", args.stats_out.display());

    info!(processed, skipped, failed, "run complete");
    Ok(())
}

async fn process_transcript(
    analyzer: &TextAnalyzer,
    transcript_reader: &AsyncTranscriptReader,
    file: &TranscriptFile,
    strip_commas: bool,
) -> Result<FileStats> {
    let file_start = Instant::now();
    let (content, read_stats) = transcript_reader.read_transcript(&file.path).await?;
    if let Some(error) = read_stats.read_error {
        anyhow::bail!(error);
    }

    let analysis = analyzer.analyze(&content);

    let sentences: Vec<String> = if strip_commas {
        analysis
            .sentences
            .iter()
            .map(|s| report::strip_commas(s))
            .collect()
    } else {
        analysis.sentences.clone()
    };

    let sentences_path = incremental::write_sentences_file(&file.path, &sentences)?;
    let analysis_path = incremental::write_analysis_file(&file.path, &analysis)?;
    info!(
        path = %file.path.display(),
        sentences = analysis.sentence_count,
        words = analysis.word_count,
        sentences_file = %sentences_path.display(),
        analysis_file = %analysis_path.display(),
        "transcript processed"
    );

    Ok(FileStats {
        path: file.path.display().to_string(),
        chars_processed: read_stats.chars_read,
        sentences_detected: analysis.sentence_count as u64,
        words_detected: analysis.word_count as u64,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
        status: "success".to_string(),
        error: None,
    })
}
