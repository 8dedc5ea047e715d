//! Verifies the public API surface stays usable from outside the crate.

use goftar::{
    Annotation, Enhancer, LinguisticModel, Normalizer, NormalizerConfig, Segmenter,
    SegmenterConfig, TextAnalyzer, BASIC_TERMINAL_SET, FULL_TERMINAL_SET,
};

#[test]
fn test_normalizer_from_root_export() {
    let normalizer = Normalizer::new(NormalizerConfig::default()).expect("normalizer builds");
    assert_eq!(normalizer.normalize("سلام جهان"), "سلام جهان.");
}

#[test]
fn test_segmenter_from_root_export() {
    let segmenter = Segmenter::new(SegmenterConfig::default()).expect("segmenter builds");
    let sentences = segmenter.segment("جمله اول همین است. جمله دوم هم همین است.");
    assert_eq!(sentences.len(), 2);
}

#[test]
fn test_analyzer_from_root_export() {
    let analyzer = TextAnalyzer::new().expect("analyzer builds");
    let analysis = analyzer.analyze("سلام! حال شما چطور است؟");
    assert_eq!(analysis.sentence_count, analysis.sentences.len());
    assert!(analysis.word_count > 0);
}

#[test]
fn test_terminal_set_exports() {
    assert!(FULL_TERMINAL_SET.contains(&'،'));
    assert!(!BASIC_TERMINAL_SET.contains(&'،'));
    assert!(BASIC_TERMINAL_SET.iter().all(|c| FULL_TERMINAL_SET.contains(c)));
}

#[test]
fn test_enhancer_trait_object_from_outside() {
    struct NoopModel;

    impl LinguisticModel for NoopModel {
        fn annotate(&self, text: &str) -> anyhow::Result<Annotation> {
            Ok(Annotation {
                pos_tags: text
                    .split_whitespace()
                    .map(|w| (w.to_string(), "X".to_string()))
                    .collect(),
                lemmas: text.split_whitespace().map(str::to_string).collect(),
            })
        }
    }

    let enhancer = Enhancer::from_loader(|| Ok(Box::new(NoopModel) as Box<dyn LinguisticModel>));
    assert!(enhancer.is_available());
    let annotation = enhancer
        .annotate("یک دو سه")
        .expect("enhancer stays available");
    assert_eq!(annotation.lemmas.len(), 3);
}
