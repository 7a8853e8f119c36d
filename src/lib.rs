// src/lib.rs
// Analysis core for product-review scoring. The HTTP transport lives in a
// separate service crate and maps registry operations 1:1 onto handlers.

pub mod error;
pub mod fake;
pub mod features;
pub mod helpfulness;
pub mod lexicon;
pub mod registry;
pub mod sentiment;
pub mod stats;
pub mod validate;

// ---- Re-exports for the stable public API ----
pub use crate::error::AnalysisError;
pub use crate::fake::{FakeDetectionResult, FakeReviewDetector, RiskLevel};
pub use crate::helpfulness::{HelpfulnessAnalyzer, HelpfulnessCategory, HelpfulnessResult};
pub use crate::registry::{
    AnalyzerRegistry, BackendProvider, BackendStatus, BatchItemOutcome, BatchSentimentReport,
    ComparisonResult, RegistryInfo,
};
pub use crate::sentiment::{
    BackendId, Probabilities, SentimentBackend, SentimentLabel, SentimentResult,
};
pub use crate::stats::StatisticsReport;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - a debug build
///   - REVIEW_DEV_LOG=1
///
/// Embedders that install their own subscriber should skip this.
pub fn enable_dev_tracing() {
    let dev_flag = std::env::var("REVIEW_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    if !(dev_flag && cfg!(debug_assertions)) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("registry=info,fake_detector=debug,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
