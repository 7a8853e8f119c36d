//! Analyzer registry and orchestration.
//!
//! Owns every analyzer backend, tracks per-backend load status, and
//! dispatches single, batch, and comparison requests. The registry is
//! constructed once at process start: the rule-based fake detector and
//! helpfulness analyzer load eagerly, sentiment backends go through an
//! async one-shot load phase (`initialize`). `Loaded` and `Failed` are
//! terminal; after initialization the registry is read-only and can be
//! shared freely across request tasks.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use metrics::counter;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::fake::{FakeDetectionResult, FakeReviewDetector};
use crate::helpfulness::{HelpfulnessAnalyzer, HelpfulnessResult};
use crate::sentiment::{
    BackendId, EnhancedBackend, LexiconBackend, SentimentBackend, SentimentLabel, SentimentResult,
};
use crate::validate;

/// Status map key for the fake detector (it is not a sentiment backend but
/// reports load status alongside them).
pub const FAKE_DETECTOR_KEY: &str = "fake_detector";

/// Per-backend load lifecycle. `Loaded` and `Failed` are terminal for the
/// process lifetime; there is no retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Public load-status projection, one entry per backend name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendStatus {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Static metadata about one analyzer, for the info projection.
#[derive(Debug, Clone, Serialize)]
pub struct BackendInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub loaded: bool,
    pub recommended_for: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistryInfo {
    pub models: BTreeMap<String, BackendInfo>,
    pub total_models: usize,
    pub recommended: BackendId,
}

/// Cross-backend comparison for one text.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub text: String,
    pub results: BTreeMap<String, SentimentResult>,
    /// True iff every available backend returned the same label.
    pub agreement: bool,
    pub recommended: BackendId,
}

/// One slot of a batch response: a result or that item's own failure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BatchItemOutcome {
    Success(SentimentResult),
    Failure {
        error: String,
        kind: &'static str,
        /// Offending text, truncated to 100 characters in the echo.
        text: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSentimentReport {
    pub backend: BackendId,
    pub total_analyzed: usize,
    pub results: Vec<BatchItemOutcome>,
}

/// Pluggable loader for one sentiment backend. A heavier model backend
/// implements this with real I/O; loading happens once at startup.
#[async_trait]
pub trait BackendProvider: Send + Sync {
    fn id(&self) -> BackendId;
    async fn load(&self) -> anyhow::Result<Arc<dyn SentimentBackend>>;
}

pub struct LexiconProvider;

#[async_trait]
impl BackendProvider for LexiconProvider {
    fn id(&self) -> BackendId {
        BackendId::Lexicon
    }

    async fn load(&self) -> anyhow::Result<Arc<dyn SentimentBackend>> {
        Ok(Arc::new(LexiconBackend::new()))
    }
}

pub struct EnhancedProvider;

#[async_trait]
impl BackendProvider for EnhancedProvider {
    fn id(&self) -> BackendId {
        BackendId::Enhanced
    }

    async fn load(&self) -> anyhow::Result<Arc<dyn SentimentBackend>> {
        Ok(Arc::new(EnhancedBackend::new()))
    }
}

/// The providers a default deployment loads at startup.
pub fn default_providers() -> Vec<Box<dyn BackendProvider>> {
    vec![Box::new(LexiconProvider), Box::new(EnhancedProvider)]
}

struct BackendSlot {
    state: LoadState,
    loading_time: Option<f64>,
    error: Option<String>,
    backend: Option<Arc<dyn SentimentBackend>>,
}

impl BackendSlot {
    fn empty() -> Self {
        Self {
            state: LoadState::NotLoaded,
            loading_time: None,
            error: None,
            backend: None,
        }
    }

    fn status(&self) -> BackendStatus {
        BackendStatus {
            loaded: self.state == LoadState::Loaded,
            loading_time: self.loading_time,
            error: self.error.clone(),
        }
    }
}

pub struct AnalyzerRegistry {
    slots: HashMap<BackendId, BackendSlot>,
    fake_detector_status: BackendStatus,
    fake_detector: FakeReviewDetector,
    helpfulness: HelpfulnessAnalyzer,
}

impl AnalyzerRegistry {
    /// Build the registry with the rule-based analyzers loaded eagerly.
    /// Sentiment backends stay `NotLoaded` until `initialize` runs.
    pub fn new() -> Self {
        let slots = BackendId::ALL
            .into_iter()
            .map(|id| (id, BackendSlot::empty()))
            .collect();
        info!(target: "registry", "fake detector and helpfulness analyzer loaded");
        Self {
            slots,
            fake_detector_status: BackendStatus {
                loaded: true,
                loading_time: None,
                error: None,
            },
            fake_detector: FakeReviewDetector::new(),
            helpfulness: HelpfulnessAnalyzer::new(),
        }
    }

    /// One-shot startup load phase with the default providers.
    pub async fn initialize(&mut self) {
        self.initialize_with(default_providers()).await;
    }

    /// One-shot startup load phase. Each provider transitions its backend
    /// `NotLoaded -> Loading -> Loaded | Failed`; a slot that already left
    /// `NotLoaded` is skipped (no retries at runtime).
    pub async fn initialize_with(&mut self, providers: Vec<Box<dyn BackendProvider>>) {
        for provider in providers {
            let id = provider.id();
            let slot = self.slots.entry(id).or_insert_with(BackendSlot::empty);
            if slot.state != LoadState::NotLoaded {
                warn!(target: "registry", backend = %id, "load already attempted, skipping");
                continue;
            }
            slot.state = LoadState::Loading;

            let started = Instant::now();
            match provider.load().await {
                Ok(backend) => {
                    let elapsed = started.elapsed().as_secs_f64();
                    let slot = self.slots.get_mut(&id).expect("slot exists");
                    slot.state = LoadState::Loaded;
                    slot.loading_time = Some(elapsed);
                    slot.backend = Some(backend);
                    info!(target: "registry", backend = %id, loading_time = elapsed, "backend loaded");
                }
                Err(e) => {
                    let slot = self.slots.get_mut(&id).expect("slot exists");
                    slot.state = LoadState::Failed;
                    slot.error = Some(e.to_string());
                    warn!(target: "registry", backend = %id, error = %e, "backend failed to load");
                }
            }
        }
    }

    fn backend(&self, id: BackendId) -> Result<&Arc<dyn SentimentBackend>, AnalysisError> {
        self.slots
            .get(&id)
            .and_then(|slot| slot.backend.as_ref())
            .ok_or_else(|| AnalysisError::BackendUnavailable(id.to_string()))
    }

    fn is_loaded(&self, id: BackendId) -> bool {
        self.slots
            .get(&id)
            .map(|s| s.state == LoadState::Loaded)
            .unwrap_or(false)
    }

    /// Strongest loaded backend by fixed preference order.
    fn recommended_backend(&self) -> BackendId {
        BackendId::ALL
            .into_iter()
            .find(|id| self.is_loaded(*id))
            .unwrap_or(BackendId::Lexicon)
    }

    /// Classify one text with the given backend.
    pub fn predict_sentiment(
        &self,
        text: &str,
        backend: BackendId,
    ) -> Result<SentimentResult, AnalysisError> {
        validate::review_text(text)?;
        let result = self.backend(backend)?.classify(text);
        counter!("analysis_requests_total", "op" => "sentiment", "backend" => backend.as_str())
            .increment(1);
        Ok(result)
    }

    /// Classify one text with a backend selected by name. Unknown names are
    /// an `UnsupportedBackend` error, distinct from "known but not loaded".
    pub fn predict_sentiment_named(
        &self,
        text: &str,
        backend: &str,
    ) -> Result<SentimentResult, AnalysisError> {
        let id = BackendId::from_str(backend)?;
        self.predict_sentiment(text, id)
    }

    /// Classify a batch. Per-item failures land in that item's slot; the
    /// batch never aborts early and the output length equals the input
    /// length, in order.
    pub fn batch_sentiment(
        &self,
        texts: &[String],
        backend: BackendId,
    ) -> Result<BatchSentimentReport, AnalysisError> {
        validate::batch_size(texts.len())?;

        let results = texts
            .iter()
            .map(|text| match self.predict_sentiment(text, backend) {
                Ok(result) => BatchItemOutcome::Success(result),
                Err(e) => BatchItemOutcome::Failure {
                    error: e.to_string(),
                    kind: e.kind(),
                    text: truncate_echo(text),
                },
            })
            .collect::<Vec<_>>();

        counter!("analysis_requests_total", "op" => "batch", "backend" => backend.as_str())
            .increment(1);
        Ok(BatchSentimentReport {
            backend,
            total_analyzed: results.len(),
            results,
        })
    }

    /// Run the fake-review detector.
    pub fn detect_fake(
        &self,
        text: &str,
        summary: Option<&str>,
        rating: Option<u8>,
    ) -> Result<FakeDetectionResult, AnalysisError> {
        validate::review_text(text)?;
        validate::summary(summary)?;
        validate::rating(rating)?;
        counter!("analysis_requests_total", "op" => "fake").increment(1);
        Ok(self.fake_detector.detect(text, summary, rating))
    }

    /// Run the helpfulness analyzer.
    pub fn analyze_helpfulness(
        &self,
        text: &str,
        helpful_votes: u32,
        total_votes: u32,
    ) -> Result<HelpfulnessResult, AnalysisError> {
        validate::review_text(text)?;
        counter!("analysis_requests_total", "op" => "helpfulness").increment(1);
        Ok(self.helpfulness.analyze(text, helpful_votes, total_votes))
    }

    /// Run every loaded sentiment backend on the same text and compare.
    pub fn compare(&self, text: &str) -> Result<ComparisonResult, AnalysisError> {
        validate::review_text(text)?;

        let mut results: BTreeMap<String, SentimentResult> = BTreeMap::new();
        for id in BackendId::ALL {
            if let Ok(backend) = self.backend(id) {
                results.insert(id.to_string(), backend.classify(text));
            }
        }
        if results.is_empty() {
            return Err(AnalysisError::BackendUnavailable(
                "no sentiment backend is loaded".to_string(),
            ));
        }

        let mut labels = results.values().map(|r| r.label);
        let first: SentimentLabel = labels.next().expect("results non-empty");
        let agreement = labels.all(|l| l == first);

        counter!("analysis_requests_total", "op" => "compare").increment(1);
        Ok(ComparisonResult {
            text: text.to_string(),
            results,
            agreement,
            recommended: self.recommended_backend(),
        })
    }

    /// Read-only status snapshot, one entry per backend name.
    pub fn status(&self) -> BTreeMap<String, BackendStatus> {
        let mut out: BTreeMap<String, BackendStatus> = self
            .slots
            .iter()
            .map(|(id, slot)| (id.to_string(), slot.status()))
            .collect();
        out.insert(FAKE_DETECTOR_KEY.to_string(), self.fake_detector_status.clone());
        out
    }

    /// Static backend metadata for the info projection. Pure projection,
    /// no computation.
    pub fn info(&self) -> RegistryInfo {
        let mut models = BTreeMap::new();
        models.insert(
            BackendId::Lexicon.to_string(),
            BackendInfo {
                name: "Lexicon",
                kind: "Rule-based",
                description: "Fast, lightweight lexicon sentiment analysis",
                loaded: self.is_loaded(BackendId::Lexicon),
                recommended_for: vec!["Real-time applications", "Quick prototyping"],
            },
        );
        models.insert(
            BackendId::Enhanced.to_string(),
            BackendInfo {
                name: "Enhanced",
                kind: "Heuristic-calibrated",
                description: "Lexicon polarity with length-calibrated confidence",
                loaded: self.is_loaded(BackendId::Enhanced),
                recommended_for: vec!["Production use", "Longer reviews"],
            },
        );
        models.insert(
            FAKE_DETECTOR_KEY.to_string(),
            BackendInfo {
                name: "Fake Review Detector",
                kind: "Rule-based",
                description: "Detects suspicious review patterns",
                loaded: self.fake_detector_status.loaded,
                recommended_for: vec!["Content moderation", "Quality control"],
            },
        );
        let total_models = models.len();
        RegistryInfo {
            models,
            total_models,
            recommended: self.recommended_backend(),
        }
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Echo text for batch error slots, truncated to 100 characters.
fn truncate_echo(text: &str) -> String {
    let mut out: String = text.chars().take(100).collect();
    if text.chars().count() > 100 {
        out.push_str("...");
    }
    out
}
