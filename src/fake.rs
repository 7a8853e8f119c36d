//! Rule-based fake-review detection.
//!
//! Six independent rules fire in a fixed order, each at most once per call,
//! adding a fixed weight to the suspicion score and appending one warning.
//! The score is the raw rule sum, uncapped; the tiering thresholds map it
//! to a risk level. Note the upstream schema declares the score range as
//! 0..=7 while the rule weights sum to 9 — the raw sum is kept as-is.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::features::{extract_fake_review_features, FakeReviewFeatures};

pub const WARN_VERY_SHORT: &str = "Very short review with minimal content";
pub const WARN_ALL_CAPS: &str = "Excessive capitalization";
pub const WARN_PUNCTUATION: &str = "Excessive punctuation";
pub const WARN_CONTACT_INFO: &str = "Contains contact information or links";
pub const WARN_REPEATED: &str = "Contains repeated phrases";
pub const WARN_EXTREME_SHORT: &str = "Extreme rating with very short review";

/// Rating assumed when the caller supplies none; treated as non-extreme
/// only if the caller says so explicitly.
pub const DEFAULT_RATING: u8 = 5;

/// Discrete risk tier derived from the suspicion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct FakeDetectionResult {
    pub is_suspicious: bool,
    pub risk_level: RiskLevel,
    pub suspicion_score: u32,
    pub warnings: Vec<String>,
    pub features: FakeReviewFeatures,
    /// Wall-clock cost of this detection, in seconds. Telemetry only.
    pub processing_time: f64,
}

/// Rule-based detector. Stateless; constructed eagerly at registry build.
#[derive(Debug, Clone, Default)]
pub struct FakeReviewDetector;

impl FakeReviewDetector {
    pub fn new() -> Self {
        Self
    }

    /// Score one review. `summary` is accepted for future rules but does
    /// not influence the current rule set.
    pub fn detect(&self, text: &str, _summary: Option<&str>, rating: Option<u8>) -> FakeDetectionResult {
        let started = Instant::now();
        let rating = rating.unwrap_or(DEFAULT_RATING);
        let features = extract_fake_review_features(text, rating);

        let mut score = 0u32;
        let mut warnings = Vec::new();

        if features.very_short && features.word_count < 10 {
            score += 2;
            warnings.push(WARN_VERY_SHORT.to_string());
        }
        if features.all_caps_ratio > 0.3 {
            score += 2;
            warnings.push(WARN_ALL_CAPS.to_string());
        }
        if features.excessive_punctuation {
            score += 1;
            warnings.push(WARN_PUNCTUATION.to_string());
        }
        if features.has_url || features.has_email {
            score += 2;
            warnings.push(WARN_CONTACT_INFO.to_string());
        }
        if features.repeated_phrases > 0 {
            score += 1;
            warnings.push(WARN_REPEATED.to_string());
        }
        if features.extreme_rating && features.very_short {
            score += 1;
            warnings.push(WARN_EXTREME_SHORT.to_string());
        }

        let (risk_level, is_suspicious) = if score >= 4 {
            (RiskLevel::High, true)
        } else if score >= 2 {
            (RiskLevel::Medium, true)
        } else {
            (RiskLevel::Low, false)
        };

        debug!(
            target: "fake_detector",
            score,
            risk = ?risk_level,
            warnings = warnings.len(),
            "scored review"
        );

        FakeDetectionResult {
            is_suspicious,
            risk_level,
            suspicion_score: score,
            warnings,
            features,
            processing_time: started.elapsed().as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str, rating: u8) -> FakeDetectionResult {
        FakeReviewDetector::new().detect(text, None, Some(rating))
    }

    #[test]
    fn clean_review_is_low_risk() {
        let r = detect(
            "The headphones sound balanced and the battery easily lasts a full work week. \
             Pairing was quick on both my phone and laptop.",
            4,
        );
        assert_eq!(r.suspicion_score, 0);
        assert_eq!(r.risk_level, RiskLevel::Low);
        assert!(!r.is_suspicious);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn shouty_spam_is_flagged() {
        // 73 chars, so the very-short rules stay quiet: caps (+2) and
        // punctuation (+1) put this at 3, the Medium tier.
        let r = detect("THIS IS THE BEST PRODUCT EVER!!!!!!! BUY NOW!!!!!!!!!! AMAZING!!!!!!!!", 5);
        assert!(r.is_suspicious);
        assert_eq!(r.suspicion_score, 3);
        assert_eq!(r.risk_level, RiskLevel::Medium);
        assert!(r.warnings.iter().any(|w| w == WARN_ALL_CAPS));
        assert!(r.warnings.iter().any(|w| w == WARN_PUNCTUATION));
    }

    #[test]
    fn short_shouty_spam_is_high_risk() {
        // Under 50 chars the short-review rules stack on top: 2+2+1+1 = 6.
        let r = detect("BEST PRODUCT EVER!!!!!!! BUY NOW!!!!!!!", 5);
        assert!(r.features.very_short);
        assert_eq!(r.suspicion_score, 6);
        assert_eq!(r.risk_level, RiskLevel::High);
        assert!(r.is_suspicious);
    }

    #[test]
    fn short_low_word_count_review_adds_two() {
        // Exactly 49 chars, 9 whitespace-delimited words.
        let text = "short filler text here to reach exactly 49 chs!!!";
        assert_eq!(text.chars().count(), 49);
        let r = detect(text, 3);
        assert!(r.features.very_short);
        assert_eq!(r.features.word_count, 9);
        assert!(r.warnings.iter().any(|w| w == WARN_VERY_SHORT));
        assert!(r.suspicion_score >= 2);
    }

    #[test]
    fn contact_info_adds_two() {
        let r = detect(
            "Decent product overall, more details on my blog http://example.com/review where \
             I posted photos of the unboxing and a longer comparison.",
            3,
        );
        assert!(r.features.has_url);
        assert_eq!(r.suspicion_score, 2);
        assert_eq!(r.warnings, vec![WARN_CONTACT_INFO.to_string()]);
        assert_eq!(r.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn extreme_rating_alone_is_not_enough() {
        let r = detect(
            "Works exactly as described and the installation took about ten minutes with the \
             included bracket. No complaints after a month of daily use.",
            5,
        );
        assert_eq!(r.suspicion_score, 0);
        assert!(!r.is_suspicious);
    }

    #[test]
    fn extreme_rating_with_short_review_stacks() {
        let r = detect("Great!", 5);
        // very_short + <10 words (+2), extreme & very_short (+1).
        assert_eq!(r.suspicion_score, 3);
        assert_eq!(r.risk_level, RiskLevel::Medium);
        assert_eq!(
            r.warnings,
            vec![WARN_VERY_SHORT.to_string(), WARN_EXTREME_SHORT.to_string()]
        );
    }

    #[test]
    fn missing_rating_defaults_to_extreme_five() {
        let r = FakeReviewDetector::new().detect("Great!", None, None);
        assert!(r.features.extreme_rating);
        assert_eq!(r.suspicion_score, 3);
    }

    #[test]
    fn warnings_follow_rule_order() {
        let r = detect("BUY BUY BUY NOW!!!! http://spam.example", 5);
        let expect = [
            WARN_VERY_SHORT,
            WARN_ALL_CAPS,
            WARN_PUNCTUATION,
            WARN_CONTACT_INFO,
            WARN_REPEATED,
            WARN_EXTREME_SHORT,
        ];
        // Every fired warning appears in declaration order.
        let mut last = 0usize;
        for w in &r.warnings {
            let pos = expect.iter().position(|e| e == w).unwrap();
            assert!(pos >= last, "out of order: {w}");
            last = pos;
        }
        assert_eq!(r.risk_level, RiskLevel::High);
    }

    #[test]
    fn max_rule_sum_exceeds_declared_schema_bound() {
        // All six rules at once: the raw sum is 9 even though the upstream
        // schema documents 0..=7. Behavior preserved, not renormalized.
        let text = "BUY BUY BUY NOW!!!! a@b.co";
        let r = detect(text, 5);
        assert_eq!(r.warnings.len(), 6);
        assert_eq!(r.suspicion_score, 9);
        assert_eq!(r.risk_level, RiskLevel::High);
    }
}
