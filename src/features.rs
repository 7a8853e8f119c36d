//! Text feature extraction shared by the fake-review and helpfulness
//! analyzers.
//!
//! Pure functions of the input text (plus optional rating). All quantities
//! are computed fresh per call, nothing is cached, and extraction never
//! fails: degenerate input yields zero-valued features.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("url regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").expect("email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}").expect("phone regex"));
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence split regex"));

/// Reviews shorter than this (in chars) count as "very short".
const VERY_SHORT_CHARS: usize = 50;

/// Features consumed by the fake-review detector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FakeReviewFeatures {
    pub text_length: usize,
    pub word_count: usize,
    pub excessive_punctuation: bool,
    pub all_caps_ratio: f64,
    pub has_url: bool,
    pub has_email: bool,
    pub has_phone: bool,
    pub very_short: bool,
    pub single_sentence: bool,
    pub repeated_phrases: usize,
    pub extreme_rating: bool,
}

/// Features consumed by the helpfulness analyzer. Polarity/subjectivity are
/// filled in by the caller's probe (0 when the probe is absent or fails).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HelpfulnessFeatures {
    pub text_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub exclamation_count: usize,
    pub question_count: usize,
    pub uppercase_ratio: f64,
    pub polarity: f64,
    pub subjectivity: f64,
}

pub fn extract_fake_review_features(text: &str, rating: u8) -> FakeReviewFeatures {
    let text_length = char_count(text);
    FakeReviewFeatures {
        text_length,
        word_count: word_count(text),
        excessive_punctuation: excessive_punctuation(text),
        all_caps_ratio: uppercase_ratio(text),
        has_url: URL_RE.is_match(text),
        has_email: EMAIL_RE.is_match(text),
        has_phone: PHONE_RE.is_match(text),
        very_short: text_length < VERY_SHORT_CHARS,
        single_sentence: text.split('.').count() <= 2,
        repeated_phrases: repeated_phrases(text),
        extreme_rating: matches!(rating, 1 | 5),
    }
}

/// Structural features only; the probe-derived fields start at 0.
pub fn extract_helpfulness_features(text: &str) -> HelpfulnessFeatures {
    HelpfulnessFeatures {
        text_length: char_count(text),
        word_count: word_count(text),
        sentence_count: sentence_count(text),
        exclamation_count: text.chars().filter(|c| *c == '!').count(),
        question_count: text.chars().filter(|c| *c == '?').count(),
        uppercase_ratio: uppercase_ratio(text),
        polarity: 0.0,
        subjectivity: 0.0,
    }
}

#[inline]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of segments produced by splitting on runs of `. ! ?`, counting
/// empty segments. Always >= 1, including for the empty string, and
/// matches the structure rule's expectations downstream: "A. B." yields 3.
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_SPLIT_RE.split(text).count()
}

/// Upper-case letters over total characters; 0 for empty text.
pub fn uppercase_ratio(text: &str) -> f64 {
    let total = char_count(text);
    if total == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / total as f64
}

/// More than three `!` and `?` combined.
pub fn excessive_punctuation(text: &str) -> bool {
    text.chars().filter(|c| *c == '!' || *c == '?').count() > 3
}

/// Count of maximal runs where the same token repeats at least three times
/// in a row, case-insensitively. Each run counts once.
pub fn repeated_phrases(text: &str) -> usize {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();

    let mut runs = 0usize;
    let mut i = 0usize;
    while i < tokens.len() {
        let mut j = i + 1;
        while j < tokens.len() && tokens[j] == tokens[i] {
            j += 1;
        }
        if j - i >= 3 {
            runs += 1;
        }
        i = j;
    }
    runs
}
