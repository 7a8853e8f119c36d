//! Statistics reporting shapes.
//!
//! Dataset-level aggregates and per-backend evaluation metrics come from an
//! external collaborator (an offline evaluation job); the core only defines
//! the stable serialized shape and ships a bundled sample snapshot so the
//! transport has something to forward before real numbers land.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_reviews: u64,
    pub sentiment_distribution: BTreeMap<String, u64>,
    pub average_text_length: f64,
    pub helpful_reviews_percentage: f64,
    pub suspicious_reviews_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub accuracy: f64,
    pub precision: BTreeMap<String, f64>,
    pub recall: BTreeMap<String, f64>,
    pub f1_score: BTreeMap<String, f64>,
    /// Rows are true labels, columns predicted, both in Negative/Neutral/
    /// Positive order.
    pub confusion_matrix: Vec<Vec<u64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub dataset: DatasetStatistics,
    pub model_performance: BTreeMap<String, ModelPerformance>,
    /// RFC 3339 timestamp of the snapshot.
    pub last_updated: String,
}

impl StatisticsReport {
    /// Bundled sample snapshot, timestamped at call time.
    pub fn sample() -> Self {
        let dataset = DatasetStatistics {
            total_reviews: 9000,
            sentiment_distribution: BTreeMap::from([
                ("Positive".to_string(), 3000),
                ("Negative".to_string(), 3000),
                ("Neutral".to_string(), 3000),
            ]),
            average_text_length: 245.5,
            helpful_reviews_percentage: 65.2,
            suspicious_reviews_percentage: 12.4,
        };

        let lexicon = ModelPerformance {
            accuracy: 0.465,
            precision: per_label(0.591, 0.291, 0.432),
            recall: per_label(0.431, 0.036, 0.929),
            f1_score: per_label(0.499, 0.063, 0.590),
            confusion_matrix: vec![vec![194, 30, 226], vec![111, 16, 323], vec![23, 9, 418]],
        };
        let enhanced = ModelPerformance {
            accuracy: 0.873,
            precision: per_label(0.856, 0.834, 0.928),
            recall: per_label(0.891, 0.812, 0.916),
            f1_score: per_label(0.873, 0.823, 0.922),
            confusion_matrix: vec![vec![401, 27, 22], vec![34, 366, 50], vec![29, 42, 379]],
        };

        Self {
            dataset,
            model_performance: BTreeMap::from([
                ("lexicon".to_string(), lexicon),
                ("enhanced".to_string(), enhanced),
            ]),
            last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

fn per_label(negative: f64, neutral: f64, positive: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("Negative".to_string(), negative),
        ("Neutral".to_string(), neutral),
        ("Positive".to_string(), positive),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_snapshot_serializes_with_expected_shape() {
        let report = StatisticsReport::sample();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["dataset"]["total_reviews"], 9000);
        assert!(v["model_performance"]["lexicon"]["accuracy"].is_number());
        assert!(v["model_performance"]["enhanced"]["confusion_matrix"].is_array());
        assert!(v["last_updated"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn snapshot_round_trips() {
        let report = StatisticsReport::sample();
        let json = serde_json::to_string(&report).unwrap();
        let back: StatisticsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
