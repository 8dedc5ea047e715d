//! Deterministic Persian/mixed-script transcript normalization and sentence
//! segmentation.
//!
//! The core is two pure, total functions behind small configurable types:
//! [`Normalizer`] canonicalizes raw transcript text into a single well-formed
//! line, and [`Segmenter`] splits it into well-punctuated sentence units.
//! [`TextAnalyzer`] combines both with an optional linguistic enhancement
//! layer. The remaining modules are batch plumbing for the CLI: transcript
//! discovery, async reading, incremental output files, and run statistics.

pub mod analysis;
pub mod discovery;
pub mod enhancement;
pub mod incremental;
pub mod normalizer;
pub mod reader;
pub mod report;
pub mod segmenter;

// Re-export main types for convenient access
pub use analysis::{TextAnalysis, TextAnalyzer};
pub use enhancement::{Annotation, Enhancer, LinguisticModel};
pub use normalizer::{Normalizer, NormalizerConfig, BASIC_TERMINAL_SET, FULL_TERMINAL_SET};
pub use segmenter::{Segmenter, SegmenterConfig};
