// Detection domain models - data structures for the spam detector.
//
// These are pure domain types with no terminal or I/O dependencies.
// The console layer renders them; the infra layer stores them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Maximum number of results kept in the history log.
pub const HISTORY_CAPACITY: usize = 50;

/// Maximum number of characters of analyzed content copied into a result.
pub const CONTENT_PREVIEW_CHARS: usize = 200;

/// Appended to the preview when the content was cut.
pub const TRUNCATION_MARKER: &str = "...";

/// How serious a single indicator is. Drives its score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Score contribution of one indicator with this severity.
    pub fn weight(&self) -> f64 {
        match self {
            Severity::High => 0.3,
            Severity::Medium => 0.2,
            Severity::Low => 0.1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// One positive finding from the content analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamIndicator {
    /// Category label, e.g. "Spam Keywords" or "Suspicious Links"
    #[serde(rename = "type")]
    pub indicator_type: String,
    /// Human-readable description (may embed matched terms or counts)
    pub description: String,
    pub severity: Severity,
    /// Always true for emitted indicators. Kept so consumers see the same record shape.
    pub detected: bool,
}

impl SpamIndicator {
    /// Create a detected indicator.
    pub fn detected(
        indicator_type: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            indicator_type: indicator_type.into(),
            description: description.into(),
            severity,
            detected: true,
        }
    }
}

/// The outcome of analyzing one piece of content.
///
/// Created once per `detect` call and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Unique per analysis (UUID v4)
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// First 200 characters of the input, plus "..." if it was longer
    pub content: String,
    pub is_spam: bool,
    /// In [0, 1], rounded to two decimals
    pub confidence: f64,
    /// In detection order
    pub indicators: Vec<SpamIndicator>,
    /// Wall-clock milliseconds spent in `detect`
    pub processing_time: u64,
}

/// Summary derived from the history log on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_emails: usize,
    pub spam_detected: usize,
    /// Mean confidence over the log, rounded to two decimals
    pub average_confidence: f64,
    /// Up to three distinct indicator types, most frequent first
    pub most_common_indicators: Vec<String>,
}

impl Statistics {
    /// Percentage of logged results flagged as spam (0 for an empty log).
    pub fn spam_rate(&self) -> f64 {
        if self.total_emails == 0 {
            return 0.0;
        }
        self.spam_detected as f64 / self.total_emails as f64 * 100.0
    }

    /// Percentage of logged results considered legitimate.
    pub fn legitimate_rate(&self) -> f64 {
        100.0 - self.spam_rate()
    }
}

/// Whether the synthetic "Suspicious Subject" pass runs.
///
/// The analyzer never separates a subject line from the body, so this pass
/// does not look at the content at all. It fires at random.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubjectHeuristic {
    /// Emit the indicator with the given probability
    Randomized { probability: f64 },
    /// Never emit it
    Disabled,
}

/// Tuning knobs for the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    /// Scores strictly above this are spam
    pub spam_threshold: f64,
    /// Half-width of the uniform random jitter added to each score
    pub jitter: f64,
    pub subject_heuristic: SubjectHeuristic,
    /// Cosmetic processing delay in milliseconds, `None` to skip it
    pub simulated_delay: Option<Range<u64>>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            spam_threshold: 0.6,
            jitter: 0.1,
            subject_heuristic: SubjectHeuristic::Randomized { probability: 0.3 },
            simulated_delay: Some(1500..2500),
        }
    }
}

impl DetectorConfig {
    /// Config with every random or cosmetic element switched off.
    #[allow(dead_code)]
    pub fn deterministic() -> Self {
        Self {
            jitter: 0.0,
            subject_heuristic: SubjectHeuristic::Disabled,
            simulated_delay: None,
            ..Default::default()
        }
    }
}
