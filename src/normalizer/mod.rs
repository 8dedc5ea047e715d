//! Canonicalization of raw transcript text into a single well-formed line.
//!
//! The pipeline is an ordered list of named rewrite stages: Unicode
//! composition, script unification, typography rules, numeral conversion,
//! whitespace/punctuation standardization, and a terminal-punctuation
//! guarantee. Later stages assume earlier canonicalization, so the order is
//! part of the contract. Normalization is total: every input, including the
//! empty string, maps to a defined output.

use anyhow::Result;
use regex_automata::{meta::Regex, Input};
use unicode_normalization::UnicodeNormalization;

pub mod script;
pub mod typography;

pub use script::{is_persian_block, ZWNJ};

/// Terminal punctuation of the fuller legacy rule set: CJK/Latin/Persian
/// period and question/exclamation variants plus the comma and semicolon
/// forms used for sub-sentence continuation.
pub const FULL_TERMINAL_SET: &[char] = &['。', '．', '.', '؟', '!', '?', '！', '،', ';', '؛'];

/// Terminal punctuation of the leaner legacy rule set (no comma/semicolon).
pub const BASIC_TERMINAL_SET: &[char] = &['。', '．', '.', '؟', '!', '?', '！'];

/// Configuration for the normalization pipeline.
///
/// The two legacy rule sets are unified here: the default enables the fuller
/// one, and the leaner behavior is reachable by disabling `typography` and
/// selecting [`BASIC_TERMINAL_SET`].
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Apply the typography stages (repeated-punctuation and stretched-letter
    /// collapsing, ellipsis, ZWNJ attachment, bracket tightening, list
    /// punctuation, question-mark localization).
    pub typography: bool,
    /// Rewrite short double-quoted spans with Persian guillemets.
    /// Only consulted when `typography` is enabled.
    pub guillemets: bool,
    /// Characters that count as sentence-final; a period is appended when the
    /// output does not already end with one of these.
    pub terminal_punctuation: Vec<char>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            typography: true,
            guillemets: true,
            terminal_punctuation: FULL_TERMINAL_SET.to_vec(),
        }
    }
}

/// Deterministic transcript text normalizer.
pub struct Normalizer {
    config: NormalizerConfig,
    // Double-quoted span of 1-80 characters with no newline
    quote_spans: Regex,
}

impl Normalizer {
    /// Create a normalizer with custom configuration.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let quote_spans = Regex::new(r#""[^"\n]{1,80}""#)?;
        Ok(Self {
            config,
            quote_spans,
        })
    }

    /// Create a normalizer with the fuller default rule set.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(NormalizerConfig::default())
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Canonicalize raw text into a single well-formed line.
    ///
    /// Never fails; empty input yields an empty string. Non-empty output is
    /// NFC-composed, tatweel-free, single-spaced, trimmed, and ends with a
    /// mark from the configured terminal set.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut value: String = text.nfc().collect();
        value = script::unify_script(&value);
        value = script::remove_tatweel(&value);

        if self.config.typography {
            // Ellipsis first: remaining two-period runs then collapse to one
            value = typography::normalize_ellipsis(&value);
            value = typography::collapse_repeated_punctuation(&value);
            value = typography::collapse_stretched_letters(&value);
            value = typography::attach_prefixes(&value);
            value = typography::attach_suffixes(&value);
            value = typography::attach_plural_ezafe(&value);
            if self.config.guillemets {
                value = self.convert_quotes(&value);
            }
            value = typography::tighten_brackets(&value);
            value = typography::normalize_list_punctuation(&value);
            value = typography::localize_question_marks(&value);
        }

        value = script::convert_digits(&value);
        value = typography::space_punctuation(&value);
        value = collapse_whitespace(&value);

        if let Some(last) = value.chars().last() {
            if !self.config.terminal_punctuation.contains(&last) {
                value.push('.');
            }
        }

        value
    }

    /// Rewrite each double-quoted span as a guillemet-bracketed span.
    fn convert_quotes(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for mat in self.quote_spans.find_iter(Input::new(text)) {
            out.push_str(&text[last..mat.start()]);
            out.push('«');
            out.push_str(&text[mat.start() + 1..mat.end() - 1]);
            out.push('»');
            last = mat.end();
        }
        out.push_str(&text[last..]);
        out
    }
}

/// Collapse every whitespace run to a single ASCII space and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
