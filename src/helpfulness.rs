//! Helpfulness scoring.
//!
//! Additive score starting from a 0.5 base, adjusted by length, detail,
//! and structure signals, clamped to [0, 1], then bucketed into a
//! category. Vote counts are accepted and echoed for reporting but do not
//! influence the score.
//!
//! Polarity/subjectivity are best-effort auxiliary features supplied by an
//! injected probe; a missing or failing probe resolves to 0 for both and
//! never fails the call.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::warn;

use crate::features::{extract_helpfulness_features, HelpfulnessFeatures};
use crate::lexicon;

const BASE_SCORE: f64 = 0.5;
const LONG_TEXT_BONUS: f64 = 0.2;
const SHORT_TEXT_PENALTY: f64 = 0.1;
const DETAIL_BONUS: f64 = 0.1;
const STRUCTURE_BONUS: f64 = 0.1;

pub const REC_MORE_DETAIL: &str = "Add more detail about your experience";
pub const REC_MORE_CONTEXT: &str = "Include more context and examples";

/// Auxiliary polarity/subjectivity capability. Injection happens at
/// construction; absence is a configuration fact, not a per-call error.
pub trait SubjectivityProbe: Send + Sync {
    /// Returns `(polarity, subjectivity)` for the text.
    fn assess(&self, text: &str) -> anyhow::Result<(f64, f64)>;
}

/// Default probe backed by the embedded lexicon: polarity is the compound
/// score, subjectivity the share of valence-bearing tokens.
#[derive(Debug, Clone, Default)]
pub struct LexiconProbe;

impl SubjectivityProbe for LexiconProbe {
    fn assess(&self, text: &str) -> anyhow::Result<(f64, f64)> {
        let scores = lexicon::polarity_scores(text);
        Ok((scores.compound, lexicon::subjectivity(text)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HelpfulnessCategory {
    #[serde(rename = "Very Helpful")]
    VeryHelpful,
    #[serde(rename = "Helpful")]
    Helpful,
    #[serde(rename = "Somewhat Helpful")]
    SomewhatHelpful,
    #[serde(rename = "Not Helpful")]
    NotHelpful,
}

#[derive(Debug, Clone, Serialize)]
pub struct HelpfulnessResult {
    /// Predicted helpfulness ratio in [0, 1].
    pub predicted_helpfulness_ratio: f64,
    pub helpfulness_category: HelpfulnessCategory,
    /// Always equal to the ratio; duplicated for response compatibility.
    pub quality_score: f64,
    pub features: HelpfulnessFeatures,
    pub recommendations: Vec<String>,
    /// Vote counts echoed from the request; not used in scoring.
    pub helpful_votes: u32,
    pub total_votes: u32,
    /// Wall-clock cost of this analysis, in seconds. Telemetry only.
    pub processing_time: f64,
}

pub struct HelpfulnessAnalyzer {
    probe: Option<Arc<dyn SubjectivityProbe>>,
}

impl HelpfulnessAnalyzer {
    /// Analyzer with the default lexicon-backed probe.
    pub fn new() -> Self {
        Self {
            probe: Some(Arc::new(LexiconProbe)),
        }
    }

    /// Analyzer with an explicit probe, or none at all.
    pub fn with_probe(probe: Option<Arc<dyn SubjectivityProbe>>) -> Self {
        Self { probe }
    }

    pub fn analyze(&self, text: &str, helpful_votes: u32, total_votes: u32) -> HelpfulnessResult {
        let started = Instant::now();
        let mut features = extract_helpfulness_features(text);

        // Best-effort auxiliary features; failures degrade to neutral zeros.
        if let Some(probe) = &self.probe {
            match probe.assess(text) {
                Ok((polarity, subjectivity)) => {
                    features.polarity = polarity;
                    features.subjectivity = subjectivity;
                }
                Err(e) => {
                    warn!(target: "helpfulness", error = %e, "subjectivity probe failed, using neutral defaults");
                }
            }
        }

        let mut score = BASE_SCORE;
        if features.text_length > 200 {
            score += LONG_TEXT_BONUS;
        } else if features.text_length < 50 {
            score -= SHORT_TEXT_PENALTY;
        }
        if features.exclamation_count > 0 && features.exclamation_count < 3 {
            score += DETAIL_BONUS;
        }
        if features.sentence_count > 2 {
            score += STRUCTURE_BONUS;
        }
        let score = score.clamp(0.0, 1.0);

        let category = if score >= 0.7 {
            HelpfulnessCategory::VeryHelpful
        } else if score >= 0.5 {
            HelpfulnessCategory::Helpful
        } else if score >= 0.3 {
            HelpfulnessCategory::SomewhatHelpful
        } else {
            HelpfulnessCategory::NotHelpful
        };

        let mut recommendations = Vec::new();
        if features.text_length < 100 {
            recommendations.push(REC_MORE_DETAIL.to_string());
        }
        if features.sentence_count < 2 {
            recommendations.push(REC_MORE_CONTEXT.to_string());
        }

        HelpfulnessResult {
            predicted_helpfulness_ratio: score,
            helpfulness_category: category,
            quality_score: score,
            features,
            recommendations,
            helpful_votes,
            total_votes,
            processing_time: started.elapsed().as_secs_f64(),
        }
    }
}

impl Default for HelpfulnessAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
