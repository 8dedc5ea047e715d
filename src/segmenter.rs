//! Staged sentence segmentation for punctuation-poor transcript text.
//!
//! Speech-recognition output frequently arrives with no punctuation at all,
//! so the algorithm degrades from punctuation-aware splitting to pure
//! length-based chunking: primary split at terminal punctuation, short
//! fragment merging, fixed-window fallback when no usable boundaries exist,
//! and re-splitting of overlong sentences at clause delimiters. Every
//! returned sentence ends with terminal or continuation punctuation.
//!
//! Segmentation assumes already-normalized input but is robust to raw input,
//! since it is also called standalone.

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use unicode_normalization::UnicodeNormalization;

/// Marks that terminate a sentence for splitting purposes.
const SPLIT_TERMINALS: &[char] = &['.', '!', '?', '؟'];

/// Marks that validly end a finished sentence, including the continuation
/// comma/semicolon produced by long-sentence re-splitting.
const SENTENCE_FINALS: &[char] = &['.', '!', '?', '؟', '،', ';'];

/// Configuration for the segmentation fallback tiers.
///
/// The window sizes approximate natural sentence length for Persian/mixed
/// transcripts and are exposed so they can be tuned per language or domain
/// without touching the algorithm.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Pieces with at most this many words merge into the previous sentence.
    pub merge_max_words: usize,
    /// Window size (words) when punctuation-free text is chunked by length.
    pub fallback_chunk_words: usize,
    /// Sentences above this word count are re-split.
    pub long_sentence_words: usize,
    /// Window size (words) when an overlong sentence has no clause delimiter.
    pub resplit_window_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            merge_max_words: 2,
            fallback_chunk_words: 18,
            long_sentence_words: 40,
            resplit_window_words: 22,
        }
    }
}

/// Rule-based sentence segmenter.
pub struct Segmenter {
    config: SegmenterConfig,
    // Terminal punctuation followed by whitespace; the punctuation stays with
    // the preceding piece and the whitespace is the delimiter
    boundary: Regex,
    // Clause delimiter (Persian or Latin comma/semicolon) consumed by the
    // long-sentence re-split, whitespace required after
    clause: Regex,
}

impl Segmenter {
    /// Create a segmenter with custom window configuration.
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        let boundary = Regex::new(r"[.!?؟]\s+")?;
        let clause = Regex::new(r"\s*[،;,]\s+")?;
        Ok(Self {
            config,
            boundary,
            clause,
        })
    }

    /// Create a segmenter with the default windows (18-word fallback chunks,
    /// 22-word re-split windows).
    pub fn with_default_rules() -> Result<Self> {
        Self::new(SegmenterConfig::default())
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Split text into an ordered sequence of well-punctuated sentences.
    ///
    /// Never fails and always terminates; empty input yields an empty
    /// sequence. Every returned sentence is non-empty and ends with a mark
    /// from `{., !, ?, ؟, ،, ;}`.
    pub fn segment(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let value: String = text.nfc().collect::<String>().trim().to_string();
        // The ellipsis came from collapsed periods; restore them so the
        // boundary pattern treats it as terminal punctuation
        let value = value.replace('…', "...");
        let value = ensure_boundary_spacing(&value);

        let mut sentences: Vec<String> = Vec::new();
        for piece in self.split_at_boundaries(&value) {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            match sentences.last_mut() {
                // Short fragments extend the previous sentence instead of
                // becoming their own degenerate unit
                Some(last) if word_count(piece) <= self.config.merge_max_words => {
                    last.push(' ');
                    last.push_str(piece);
                }
                _ => sentences.push(piece.to_string()),
            }
        }

        // No usable internal punctuation: chunk the word sequence instead
        if sentences.len() <= 1 {
            let fallback = self.chunk_by_words(&value);
            if !fallback.is_empty() {
                sentences = fallback;
            }
        }

        let mut refined = Vec::with_capacity(sentences.len());
        for sentence in sentences {
            if word_count(&sentence) > self.config.long_sentence_words {
                self.resplit_long_sentence(&sentence, &mut refined);
            } else {
                refined.push(sentence);
            }
        }

        for sentence in &mut refined {
            if !ends_with_sentence_final(sentence) {
                sentence.push('.');
            }
        }
        refined
    }

    /// Split at every terminal punctuation mark followed by whitespace,
    /// keeping the mark attached to the preceding piece.
    fn split_at_boundaries<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for mat in self.boundary.find_iter(Input::new(text)) {
            let punct_len = text[mat.start()..]
                .chars()
                .next()
                .map(char::len_utf8)
                .unwrap_or(1);
            pieces.push(&text[last..mat.start() + punct_len]);
            last = mat.end();
        }
        pieces.push(&text[last..]);
        pieces
    }

    /// Fixed-size word windows, each guaranteed terminal punctuation.
    fn chunk_by_words(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let window = self.config.fallback_chunk_words.max(1);
        words
            .chunks(window)
            .map(|chunk| {
                let mut sentence = chunk.join(" ");
                if !ends_with_split_terminal(&sentence) {
                    sentence.push('.');
                }
                sentence
            })
            .collect()
    }

    /// Re-split an overlong sentence at clause delimiters, falling back to
    /// fixed word windows when none are present. Non-final pieces receive a
    /// Persian comma to signal continuation; the final piece keeps whatever
    /// terminal mark it already carries.
    fn resplit_long_sentence(&self, sentence: &str, out: &mut Vec<String>) {
        let mut parts = self.split_at_clauses(sentence);
        if parts.len() == 1 {
            let words: Vec<&str> = sentence.split_whitespace().collect();
            let window = self.config.resplit_window_words.max(1);
            parts = words.chunks(window).map(|chunk| chunk.join(" ")).collect();
        }
        let count = parts.len();
        for (idx, part) in parts.into_iter().enumerate() {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let mut part = part.to_string();
            if idx + 1 < count && !ends_with_sentence_final(&part) {
                part.push('،');
            }
            out.push(part);
        }
    }

    /// Split at comma/semicolon delimiters, consuming the delimiter.
    fn split_at_clauses(&self, text: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut last = 0;
        for mat in self.clause.find_iter(Input::new(text)) {
            parts.push(text[last..mat.start()].to_string());
            last = mat.end();
        }
        parts.push(text[last..].to_string());
        parts
    }
}

/// Insert a space after every split-terminal mark that runs directly into a
/// non-space character, so the boundary pattern always finds a delimiter.
fn ensure_boundary_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if SPLIT_TERMINALS.contains(&ch) {
            if let Some(&next) = chars.peek() {
                if !next.is_whitespace() {
                    out.push(' ');
                }
            }
        }
    }
    out
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn ends_with_split_terminal(text: &str) -> bool {
    text.chars()
        .last()
        .is_some_and(|ch| SPLIT_TERMINALS.contains(&ch))
}

fn ends_with_sentence_final(text: &str) -> bool {
    text.chars()
        .last()
        .is_some_and(|ch| SENTENCE_FINALS.contains(&ch))
}
