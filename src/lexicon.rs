//! Lexicon polarity engine.
//!
//! Maps a text to a compound polarity in [-1, 1] plus a positive/negative/
//! neutral proportion triple that sums to 1. Deterministic, no I/O: the
//! valence table is embedded at compile time.
//!
//! Scoring model:
//! - per-token valence from the lexicon (lower-cased alphanumeric tokens),
//! - intensity boosters in the previous 1..=2 tokens scale the valence,
//! - a negator in the previous 1..=3 tokens inverts it,
//! - exclamation marks add a capped emphasis to the dominant direction,
//! - the raw sum is squashed into [-1, 1] via `s / sqrt(s^2 + 15)`.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon")
});

/// Squash normalization constant (same convention as the VADER family).
const NORM_ALPHA: f64 = 15.0;
/// Per-`!` emphasis, capped at four marks.
const EXCLAIM_EMPHASIS: f64 = 0.292;
/// Booster/damper delta applied to a valence-bearing token.
const BOOST_DELTA: f64 = 0.293;

/// Proportion triple plus compound polarity for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarityScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

impl PolarityScores {
    /// Scores for token-free input: fully neutral.
    fn empty() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        }
    }
}

/// Score one text. Total function: empty or token-free input yields the
/// neutral triple with compound 0.
pub fn polarity_scores(text: &str) -> PolarityScores {
    let tokens: Vec<String> = tokenize(text).collect();
    if tokens.is_empty() {
        return PolarityScores::empty();
    }

    let mut valences: Vec<f64> = Vec::with_capacity(tokens.len());
    for i in 0..tokens.len() {
        let mut v = word_valence(tokens[i].as_str());
        if v != 0.0 {
            // Intensity boosters directly before the word ("really", "very", ...).
            for k in 1..=2usize {
                if i >= k {
                    if let Some(delta) = booster_delta(tokens[i - k].as_str()) {
                        v += if v > 0.0 { delta } else { -delta };
                    }
                }
            }
            // Negation lookback inverts the adjusted valence.
            let negated = (1..=3usize).any(|k| i >= k && is_negator(tokens[i - k].as_str()));
            if negated {
                v = -v;
            }
        }
        valences.push(v);
    }

    let emphasis = exclaim_emphasis(text);
    let sum: f64 = valences.iter().sum();
    let compound = if sum != 0.0 {
        normalize(sum + sum.signum() * emphasis)
    } else {
        0.0
    };

    // Proportion triple: each hit weighted by |valence|+1, neutrals count 1.
    let mut pos_sum = 0.0f64;
    let mut neg_sum = 0.0f64;
    let mut neu_count = 0.0f64;
    for v in &valences {
        if *v > 0.0 {
            pos_sum += v + 1.0;
        } else if *v < 0.0 {
            neg_sum += v.abs() + 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    if pos_sum > neg_sum {
        pos_sum += emphasis;
    } else if neg_sum > pos_sum {
        neg_sum += emphasis;
    }

    let total = pos_sum + neg_sum + neu_count;
    if total == 0.0 {
        return PolarityScores::empty();
    }
    PolarityScores {
        positive: pos_sum / total,
        negative: neg_sum / total,
        neutral: neu_count / total,
        compound,
    }
}

/// Share of tokens carrying any lexicon valence, in [0, 1]. Used as a cheap
/// subjectivity proxy by the helpfulness analyzer. 0 for token-free input.
pub fn subjectivity(text: &str) -> f64 {
    let mut total = 0usize;
    let mut scored = 0usize;
    for tok in tokenize(text) {
        total += 1;
        if word_valence(&tok) != 0.0 {
            scored += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        scored as f64 / total as f64
    }
}

#[inline]
fn word_valence(w: &str) -> f64 {
    *LEXICON.get(w).unwrap_or(&0.0)
}

fn normalize(sum: f64) -> f64 {
    let norm = sum / (sum * sum + NORM_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}

fn exclaim_emphasis(text: &str) -> f64 {
    let n = text.chars().filter(|c| *c == '!').count().min(4);
    n as f64 * EXCLAIM_EMPHASIS
}

/// Alphanumeric tokens, lower-cased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

/// Negator set. Contraction stems ("isn", "don", ...) cover "isn't" etc.,
/// which the tokenizer splits at the apostrophe.
fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not"
            | "never"
            | "cannot"
            | "without"
            | "neither"
            | "nor"
            | "isn"
            | "wasn"
            | "aren"
            | "weren"
            | "don"
            | "doesn"
            | "didn"
            | "couldn"
            | "wouldn"
            | "shouldn"
            | "hasn"
            | "haven"
    )
}

fn booster_delta(tok: &str) -> Option<f64> {
    match tok {
        "absolutely" | "extremely" | "incredibly" | "really" | "very" | "highly" | "totally"
        | "completely" | "utterly" | "truly" => Some(BOOST_DELTA),
        "slightly" | "somewhat" | "barely" | "marginally" | "kinda" | "sorta" => {
            Some(-BOOST_DELTA)
        }
        _ => None,
    }
}
