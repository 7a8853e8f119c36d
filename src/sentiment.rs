//! Sentiment scoring backends.
//!
//! Two interchangeable backends behind one `SentimentBackend` trait:
//! - `lexicon`: direct lexicon compound thresholding,
//! - `enhanced`: same polarity engine, confidence reshaped by length
//!   heuristics to stand in for a stronger model until one is plugged in.
//!
//! Label thresholds are shared: compound >= 0.05 is Positive, <= -0.05 is
//! Negative, anything between is Neutral.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::features::{char_count, word_count};
use crate::lexicon::{polarity_scores, PolarityScores};

const POSITIVE_THRESHOLD: f64 = 0.05;
const NEGATIVE_THRESHOLD: f64 = -0.05;
/// Fixed confidence for neutral classifications in base mode.
const NEUTRAL_CONFIDENCE: f64 = 0.5;
/// Ceiling for the enhanced backend's boosted confidence.
const ENHANCED_CONFIDENCE_CAP: f64 = 0.95;

/// Closed set of recognized sentiment backends, in preference order
/// (strongest first). Dispatch goes through this enum, never raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendId {
    Enhanced,
    Lexicon,
}

impl BackendId {
    pub const ALL: [BackendId; 2] = [BackendId::Enhanced, BackendId::Lexicon];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::Enhanced => "enhanced",
            BackendId::Lexicon => "lexicon",
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendId {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enhanced" => Ok(BackendId::Enhanced),
            "lexicon" => Ok(BackendId::Lexicon),
            other => Err(AnalysisError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Predicted polarity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Probability triple; sums to 1 within floating-point tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl From<PolarityScores> for Probabilities {
    fn from(s: PolarityScores) -> Self {
        Self {
            positive: s.positive,
            negative: s.negative,
            neutral: s.neutral,
        }
    }
}

/// One backend's verdict for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub backend: BackendId,
    pub text_length: usize,
    /// Wall-clock cost of this classification, in seconds. Telemetry only.
    pub processing_time: f64,
}

/// Capability interface every sentiment backend satisfies. A heavier model
/// backend plugs in here without the registry changing shape.
pub trait SentimentBackend: Send + Sync {
    fn id(&self) -> BackendId;
    fn classify(&self, text: &str) -> SentimentResult;
}

fn label_for(compound: f64) -> SentimentLabel {
    if compound >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Base lexicon backend: confidence is the compound magnitude, except the
/// neutral band where it is pinned at 0.5.
#[derive(Debug, Clone, Default)]
pub struct LexiconBackend;

impl LexiconBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentBackend for LexiconBackend {
    fn id(&self) -> BackendId {
        BackendId::Lexicon
    }

    fn classify(&self, text: &str) -> SentimentResult {
        let started = Instant::now();
        let scores = polarity_scores(text);
        let label = label_for(scores.compound);
        let confidence = match label {
            SentimentLabel::Positive => scores.compound,
            SentimentLabel::Negative => scores.compound.abs(),
            SentimentLabel::Neutral => NEUTRAL_CONFIDENCE,
        };
        SentimentResult {
            label,
            confidence,
            probabilities: scores.into(),
            backend: BackendId::Lexicon,
            text_length: char_count(text),
            processing_time: started.elapsed().as_secs_f64(),
        }
    }
}

/// Enhanced backend: same polarity engine, but confidence starts at the
/// compound magnitude and gets multiplicative boosts for longer input,
/// each application capped at 0.95.
#[derive(Debug, Clone, Default)]
pub struct EnhancedBackend;

impl EnhancedBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentBackend for EnhancedBackend {
    fn id(&self) -> BackendId {
        BackendId::Enhanced
    }

    fn classify(&self, text: &str) -> SentimentResult {
        let started = Instant::now();
        let scores = polarity_scores(text);
        let text_length = char_count(text);

        let mut confidence = scores.compound.abs();
        if word_count(text) > 50 {
            confidence = (confidence * 1.1).min(ENHANCED_CONFIDENCE_CAP);
        }
        if text_length > 500 {
            confidence = (confidence * 1.05).min(ENHANCED_CONFIDENCE_CAP);
        }

        SentimentResult {
            label: label_for(scores.compound),
            confidence,
            probabilities: scores.into(),
            backend: BackendId::Enhanced,
            text_length,
            processing_time: started.elapsed().as_secs_f64(),
        }
    }
}
