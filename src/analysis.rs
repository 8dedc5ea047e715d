//! Combined analysis view over normalization, segmentation, and the optional
//! enhancement layer.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;

use crate::enhancement::Enhancer;
use crate::normalizer::{Normalizer, NormalizerConfig};
use crate::segmenter::{Segmenter, SegmenterConfig};

/// Analysis record for one transcript.
///
/// The optional fields are present only when the enhancement layer produced
/// output; their absence is the only externally visible effect of that
/// layer's failure or unavailability.
#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    /// Character count of the raw input.
    pub original_length: usize,
    /// Character count of the normalized text.
    pub normalized_length: usize,
    pub sentence_count: usize,
    /// Whitespace-token count of the normalized text.
    pub word_count: usize,
    pub normalized_text: String,
    pub sentences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_analysis: Option<Vec<(String, String)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lemmas: Option<Vec<String>>,
    /// Distinct-lemma count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_words: Option<usize>,
}

/// Facade bundling the deterministic core with an optional enhancement layer.
pub struct TextAnalyzer {
    normalizer: Normalizer,
    segmenter: Segmenter,
    enhancer: Enhancer,
}

impl TextAnalyzer {
    /// Analyzer with default rules and no enhancement layer.
    pub fn new() -> Result<Self> {
        Self::with_configs(NormalizerConfig::default(), SegmenterConfig::default())
    }

    pub fn with_configs(
        normalizer_config: NormalizerConfig,
        segmenter_config: SegmenterConfig,
    ) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new(normalizer_config)?,
            segmenter: Segmenter::new(segmenter_config)?,
            enhancer: Enhancer::disabled(),
        })
    }

    /// Attach an enhancement layer. Its failures never surface past the
    /// analysis boundary.
    pub fn with_enhancer(mut self, enhancer: Enhancer) -> Self {
        self.enhancer = enhancer;
        self
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Normalize, segment, and (when available) annotate raw text.
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let normalized = self.normalizer.normalize(text);
        let sentences = self.segmenter.segment(&normalized);
        let word_count = normalized.split_whitespace().count();

        let (pos_analysis, lemmas, unique_words) = match self.enhancer.annotate(&normalized) {
            Some(annotation) => {
                let unique = annotation.lemmas.iter().collect::<HashSet<_>>().len();
                (
                    Some(annotation.pos_tags),
                    Some(annotation.lemmas),
                    Some(unique),
                )
            }
            None => (None, None, None),
        };

        TextAnalysis {
            original_length: text.chars().count(),
            normalized_length: normalized.chars().count(),
            sentence_count: sentences.len(),
            word_count,
            normalized_text: normalized,
            sentences,
            pos_analysis,
            lemmas,
            unique_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancement::{Annotation, LinguisticModel};

    struct ConstantTagger;

    impl LinguisticModel for ConstantTagger {
        fn annotate(&self, text: &str) -> Result<Annotation> {
            let tokens: Vec<&str> = text.split_whitespace().collect();
            Ok(Annotation {
                pos_tags: tokens
                    .iter()
                    .map(|t| (t.to_string(), "X".to_string()))
                    .collect(),
                lemmas: tokens.iter().map(|t| t.to_string()).collect(),
            })
        }
    }

    #[test]
    fn test_analyze_counts() {
        let analyzer = TextAnalyzer::new().expect("default analyzer");
        let analysis = analyzer.analyze("سلام! چطور هستید؟ من خوبم. امروز هوا خیلی خوبه.");
        assert_eq!(analysis.sentence_count, analysis.sentences.len());
        assert!(analysis.sentence_count >= 2);
        assert_eq!(
            analysis.word_count,
            analysis.normalized_text.split_whitespace().count()
        );
        assert_eq!(
            analysis.normalized_length,
            analysis.normalized_text.chars().count()
        );
        assert!(analysis.pos_analysis.is_none());
        assert!(analysis.lemmas.is_none());
        assert!(analysis.unique_words.is_none());
    }

    #[test]
    fn test_analyze_empty_input() {
        let analyzer = TextAnalyzer::new().expect("default analyzer");
        let analysis = analyzer.analyze("");
        assert_eq!(analysis.original_length, 0);
        assert_eq!(analysis.normalized_length, 0);
        assert_eq!(analysis.sentence_count, 0);
        assert_eq!(analysis.word_count, 0);
        assert!(analysis.sentences.is_empty());
    }

    #[test]
    fn test_enhanced_fields_present_with_model() {
        let analyzer = TextAnalyzer::new()
            .expect("default analyzer")
            .with_enhancer(Enhancer::from_loader(|| {
                Ok(Box::new(ConstantTagger) as Box<dyn LinguisticModel>)
            }));
        let analysis = analyzer.analyze("سلام جهان و سلام دوباره");
        let pos = analysis.pos_analysis.expect("pos tags");
        let lemmas = analysis.lemmas.expect("lemmas");
        assert_eq!(pos.len(), lemmas.len());
        // سلام appears twice, so distinct lemmas are fewer than tokens
        assert!(analysis.unique_words.expect("unique count") < lemmas.len());
    }

    #[test]
    fn test_enhancer_failure_does_not_change_core_output() {
        let plain = TextAnalyzer::new().expect("default analyzer");
        let degraded = TextAnalyzer::new()
            .expect("default analyzer")
            .with_enhancer(Enhancer::from_loader(|| {
                Err(anyhow::anyhow!("model missing"))
            }));
        let text = "می خواهم برم بیرون. شما هم می خواهید؟";
        let a = plain.analyze(text);
        let b = degraded.analyze(text);
        assert_eq!(a.normalized_text, b.normalized_text);
        assert_eq!(a.sentences, b.sentences);
        assert!(b.pos_analysis.is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let analyzer = TextAnalyzer::new().expect("default analyzer");
        let analysis = analyzer.analyze("سلام جهان.");
        let json = serde_json::to_value(&analysis).expect("serializes");
        let object = json.as_object().expect("object");
        for key in [
            "original_length",
            "normalized_length",
            "sentence_count",
            "word_count",
            "normalized_text",
            "sentences",
        ] {
            assert!(object.contains_key(key), "missing field {key}");
        }
        // Optional fields are omitted without an enhancement layer
        assert!(!object.contains_key("pos_analysis"));
        assert!(!object.contains_key("lemmas"));
        assert!(!object.contains_key("unique_words"));
    }
}
