//! Optional linguistic enhancement layer behind a capability interface.
//!
//! A richer analyzer (tokenizer, part-of-speech tagger, lemmatizer) may sit
//! downstream of normalization to produce word-level tags and lemmas for
//! diagnostics. The deterministic core never depends on it: the layer is
//! selected once at construction, and any failure, whether at construction
//! or per call, collapses to the unavailable variant for the remainder of
//! the instance's lifetime. The only externally visible effect of a failure
//! is the absence of the enhanced fields.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Word-level annotation produced by a linguistic model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Ordered (token, tag) pairs.
    pub pos_tags: Vec<(String, String)>,
    /// Lemmas parallel to `pos_tags`.
    pub lemmas: Vec<String>,
}

/// A tagger/lemmatizer backend. Implementations may load models, call out to
/// native libraries, or be arbitrarily slow; callers treat them as
/// best-effort.
pub trait LinguisticModel: Send + Sync {
    /// Annotate normalized text with (token, tag) pairs and lemmas.
    fn annotate(&self, text: &str) -> Result<Annotation>;
}

/// Capability wrapper around an optional [`LinguisticModel`].
pub struct Enhancer {
    model: Option<Box<dyn LinguisticModel>>,
    degraded: AtomicBool,
}

impl Enhancer {
    /// The unavailable variant: every annotation request returns `None`.
    pub fn disabled() -> Self {
        Self {
            model: None,
            degraded: AtomicBool::new(false),
        }
    }

    /// Run a model loader once; a load failure is logged and collapses to the
    /// unavailable variant.
    pub fn from_loader<F>(loader: F) -> Self
    where
        F: FnOnce() -> Result<Box<dyn LinguisticModel>>,
    {
        match loader() {
            Ok(model) => Self {
                model: Some(model),
                degraded: AtomicBool::new(false),
            },
            Err(error) => {
                warn!(%error, "linguistic model unavailable, continuing without enhancement");
                Self::disabled()
            }
        }
    }

    /// Whether annotation requests can currently produce output.
    pub fn is_available(&self) -> bool {
        self.model.is_some() && !self.degraded.load(Ordering::Relaxed)
    }

    /// Annotate text, or `None` when the layer is unavailable. A per-call
    /// failure degrades the layer permanently.
    pub fn annotate(&self, text: &str) -> Option<Annotation> {
        if self.degraded.load(Ordering::Relaxed) {
            return None;
        }
        let model = self.model.as_ref()?;
        match model.annotate(text) {
            Ok(annotation) => Some(annotation),
            Err(error) => {
                warn!(%error, "linguistic annotation failed, disabling enhancement layer");
                self.degraded.store(true, Ordering::Relaxed);
                None
            }
        }
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::disabled()
    }
}
