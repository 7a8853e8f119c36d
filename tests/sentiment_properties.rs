// tests/sentiment_properties.rs
//
// Invariant sweep and labeled scenarios for the sentiment backends,
// exercised through the public registry API.

use rand::Rng;

use review_sentiment_analyzer::{
    AnalyzerRegistry, BackendId, SentimentBackend, SentimentLabel,
};
use review_sentiment_analyzer::sentiment::{EnhancedBackend, LexiconBackend};

async fn registry() -> AnalyzerRegistry {
    let mut r = AnalyzerRegistry::new();
    r.initialize().await;
    r
}

const WORD_POOL: &[&str] = &[
    "amazing", "terrible", "the", "box", "love", "hate", "not", "very", "shipping", "battery",
    "broke", "great", "works", "slow", "fine", "and", "it", "really", "quality", "junk",
];

fn random_text(rng: &mut impl Rng) -> String {
    let words = rng.random_range(1..60);
    let mut out = Vec::with_capacity(words);
    for _ in 0..words {
        out.push(WORD_POOL[rng.random_range(0..WORD_POOL.len())]);
    }
    let mut text = out.join(" ");
    for _ in 0..rng.random_range(0..5) {
        text.push('!');
    }
    text
}

#[tokio::test]
async fn invariants_hold_for_random_texts_on_both_backends() {
    let registry = registry().await;
    let mut rng = rand::rng();

    for _ in 0..500 {
        let text = random_text(&mut rng);
        for backend in BackendId::ALL {
            let r = registry.predict_sentiment(&text, backend).unwrap();
            assert!(
                (0.0..=1.0).contains(&r.confidence),
                "confidence out of range for {text:?}: {}",
                r.confidence
            );
            let sum = r.probabilities.positive + r.probabilities.negative + r.probabilities.neutral;
            assert!((sum - 1.0).abs() < 1e-6, "triple sum {sum} for {text:?}");
            assert!(r.processing_time >= 0.0);
        }
    }
}

#[tokio::test]
async fn scoring_is_idempotent_up_to_timing() {
    let registry = registry().await;
    let text = "Really love the build quality, but the battery is terrible.";
    for backend in BackendId::ALL {
        let a = registry.predict_sentiment(text, backend).unwrap();
        let b = registry.predict_sentiment(text, backend).unwrap();
        assert_eq!(a.label, b.label);
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.probabilities, b.probabilities);
    }
}

#[tokio::test]
async fn glowing_review_is_positive_on_base_backend() {
    let registry = registry().await;
    let text = "This product is absolutely amazing! I love everything about it. Highly recommended!";
    let r = registry.predict_sentiment(text, BackendId::Lexicon).unwrap();
    assert_eq!(r.label, SentimentLabel::Positive);
    assert!(r.confidence > 0.0);
}

#[tokio::test]
async fn angry_review_is_negative_on_both_backends() {
    let registry = registry().await;
    let text = "Terrible quality. Broke after one day. Do not waste your money.";
    for backend in BackendId::ALL {
        let r = registry.predict_sentiment(text, backend).unwrap();
        assert_eq!(r.label, SentimentLabel::Negative, "{backend}");
    }
}

#[test]
fn empty_text_classifies_neutral_at_the_backend_level() {
    // The registry rejects empty text at the boundary; the backends
    // themselves still degrade gracefully.
    let base = LexiconBackend::new().classify("");
    assert_eq!(base.label, SentimentLabel::Neutral);
    assert_eq!(base.confidence, 0.5);
    let sum = base.probabilities.positive + base.probabilities.negative + base.probabilities.neutral;
    assert!((sum - 1.0).abs() < 1e-6);

    let enhanced = EnhancedBackend::new().classify("");
    assert_eq!(enhanced.label, SentimentLabel::Neutral);
}
