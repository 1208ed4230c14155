// Spam detection service - core business logic for classifying email content.
//
// This service handles:
// - Running the content analyzer and scoring its indicators
// - Assembling an immutable DetectionResult per call
// - Recording results in the bounded history log
// - Deriving summary statistics from that log on demand
//
// NO terminal or file I/O here - callers hand in a decoded string.

use super::content_analyzer::ContentAnalyzer;
use super::detection_models::{
    DetectionResult, DetectorConfig, Statistics, CONTENT_PREVIEW_CHARS, TRUNCATION_MARKER,
};
use super::scoring;
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use uuid::Uuid;

/// How many indicator types `statistics` reports.
const MOST_COMMON_LIMIT: usize = 3;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum HistoryError {
    #[allow(dead_code)]
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Invalid built-in pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("History error: {0}")]
    History(#[from] HistoryError),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Trait for keeping past detection results.
///
/// Implementations keep results newest first and hold at most
/// `HISTORY_CAPACITY` of them, evicting the oldest insertions first.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert a result at the head of the log, evicting from the tail on overflow.
    async fn record(&self, result: DetectionResult) -> Result<(), HistoryError>;

    /// Owned copy of the whole log, newest first.
    async fn list(&self) -> Result<Vec<DetectionResult>, HistoryError>;

    /// Owned copy of the newest `limit` results.
    async fn recent(&self, limit: usize) -> Result<Vec<DetectionResult>, HistoryError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// The spam detection engine.
///
/// Construct one per application in the composition root and share it
/// (e.g. behind an `Arc`). Every call site then sees the same history.
///
/// **Randomness:** score jitter, the simulated subject pass and the simulated
/// delay all draw from one injectable `StdRng`. Use `with_rng` with a seeded
/// generator for reproducible output.
pub struct SpamDetectionService<S: HistoryStore> {
    store: S,
    analyzer: ContentAnalyzer,
    config: DetectorConfig,
    rng: Mutex<StdRng>,
}

impl<S: HistoryStore> SpamDetectionService<S> {
    /// Create a service with an entropy-seeded random source.
    pub fn new(store: S, config: DetectorConfig) -> Result<Self, DetectionError> {
        Self::with_rng(store, config, StdRng::from_entropy())
    }

    /// Create a service with a caller-provided random source.
    pub fn with_rng(store: S, config: DetectorConfig, rng: StdRng) -> Result<Self, DetectionError> {
        let analyzer = ContentAnalyzer::new(config.subject_heuristic)?;

        Ok(Self {
            store,
            analyzer,
            config,
            rng: Mutex::new(rng),
        })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Analyze `content`, log the result and return it.
    ///
    /// Never fails because of the content itself; empty input just yields
    /// fewer indicators. The only error source is the history store.
    ///
    /// Dropping the returned future during the simulated delay cancels the
    /// detection and nothing is logged. Concurrent calls are logged in the
    /// order they complete, not the order they started.
    pub async fn detect(&self, content: &str) -> Result<DetectionResult, DetectionError> {
        let started = Instant::now();

        if let Some(delay) = self.draw_delay().await {
            tokio::time::sleep(delay).await;
        }

        let (indicators, raw_score) = {
            let mut rng = self.rng.lock().await;
            let indicators = self.analyzer.analyze(content, &mut *rng);
            let raw_score = scoring::score(&indicators, self.config.jitter, &mut *rng);
            (indicators, raw_score)
        };

        // The verdict is taken on the reported (rounded) confidence so the two always agree.
        let confidence = scoring::round2(raw_score);
        let is_spam = scoring::is_spam(confidence, self.config.spam_threshold);

        let result = DetectionResult {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            content: preview(content),
            is_spam,
            confidence,
            indicators,
            processing_time: started.elapsed().as_millis() as u64,
        };

        self.store.record(result.clone()).await?;

        tracing::info!(
            id = %result.id,
            is_spam = result.is_spam,
            confidence = result.confidence,
            indicators = result.indicators.len(),
            processing_ms = result.processing_time,
            "Detection complete"
        );

        Ok(result)
    }

    /// All logged results, newest first. The returned Vec is the caller's to keep.
    pub async fn history(&self) -> Result<Vec<DetectionResult>, DetectionError> {
        Ok(self.store.list().await?)
    }

    /// The newest `limit` logged results.
    pub async fn recent(&self, limit: usize) -> Result<Vec<DetectionResult>, DetectionError> {
        Ok(self.store.recent(limit).await?)
    }

    /// Summary of the current log. Recomputed on every call.
    pub async fn statistics(&self) -> Result<Statistics, DetectionError> {
        let history = self.store.list().await?;
        Ok(summarize(&history))
    }

    async fn draw_delay(&self) -> Option<Duration> {
        let range = self.config.simulated_delay.clone()?;
        let millis = if range.is_empty() {
            range.start
        } else {
            self.rng.lock().await.gen_range(range)
        };
        Some(Duration::from_millis(millis))
    }
}

/// Copy at most the first 200 characters, marking the cut with "...".
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let mut preview: String = chars.by_ref().take(CONTENT_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        preview.push_str(TRUNCATION_MARKER);
    }
    preview
}

/// Derive statistics from a history slice (newest first).
///
/// Indicator types are ranked by how often they occur across all results.
/// Ties keep the order in which each type was first seen while walking the
/// log from newest to oldest.
pub fn summarize(history: &[DetectionResult]) -> Statistics {
    if history.is_empty() {
        return Statistics::default();
    }

    let total_emails = history.len();
    let spam_detected = history.iter().filter(|r| r.is_spam).count();
    let average_confidence =
        history.iter().map(|r| r.confidence).sum::<f64>() / total_emails as f64;

    // A Vec keeps first-seen order; there are only a handful of types.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for indicator in history.iter().flat_map(|r| &r.indicators) {
        match counts
            .iter()
            .position(|(t, _)| *t == indicator.indicator_type)
        {
            Some(index) => counts[index].1 += 1,
            None => counts.push((indicator.indicator_type.as_str(), 1)),
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    Statistics {
        total_emails,
        spam_detected,
        average_confidence: scoring::round2(average_confidence),
        most_common_indicators: counts
            .into_iter()
            .take(MOST_COMMON_LIMIT)
            .map(|(t, _)| t.to_string())
            .collect(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
