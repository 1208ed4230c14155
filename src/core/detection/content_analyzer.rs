// Content analyzer - turns raw email text into a list of spam indicators.
//
// Passes run in a fixed order and each one appends at most one indicator:
// 1. Keyword scan (one combined indicator for all matched terms)
// 2. Pattern scan (one indicator per pattern that matched, in table order)
// 3. Length heuristic
// 4. Simulated subject heuristic (random, see `SubjectHeuristic`)
//
// The analyzer holds no state between calls. The only impurity is the random
// source handed in by the caller.

use super::detection_models::{Severity, SpamIndicator, SubjectHeuristic};
use rand::Rng;
use regex::Regex;

/// Terms matched case-insensitively anywhere in the content.
pub const SPAM_KEYWORDS: [&str; 15] = [
    "FREE",
    "URGENT",
    "ACT NOW",
    "LIMITED TIME",
    "CONGRATULATIONS",
    "WINNER",
    "CASH",
    "MONEY",
    "LOTTERY",
    "PRIZE",
    "GUARANTEED",
    "NO OBLIGATION",
    "RISK FREE",
    "CALL NOW",
    "CLICK HERE",
];

pub const SPAM_KEYWORDS_TYPE: &str = "Spam Keywords";
pub const MONEY_TYPE: &str = "Money Mentions";
pub const EXCLAMATION_TYPE: &str = "Excessive Exclamation";
pub const CAPS_TYPE: &str = "Excessive Caps";
pub const PHONE_TYPE: &str = "Phone Numbers";
pub const LINKS_TYPE: &str = "Suspicious Links";
pub const URGENCY_TYPE: &str = "Urgency Words";
pub const SHORT_CONTENT_TYPE: &str = "Short Content";
pub const SUSPICIOUS_SUBJECT_TYPE: &str = "Suspicious Subject";

/// Content shorter than this (in characters) is flagged.
pub const SHORT_CONTENT_CHARS: usize = 50;

/// (pattern, indicator type, severity) in the order they are checked.
const PATTERN_TABLE: [(&str, &str, Severity); 6] = [
    (r"\$[0-9]+", MONEY_TYPE, Severity::Medium),
    (r"!!+", EXCLAMATION_TYPE, Severity::Low),
    (r"[A-Z]{5,}", CAPS_TYPE, Severity::Medium),
    (r"[0-9]{3}-[0-9]{3}-[0-9]{4}", PHONE_TYPE, Severity::Low),
    (r"https?://\S+", LINKS_TYPE, Severity::High),
    (
        r"(?i)\b(?:urgent|hurry|act now|limited time)\b",
        URGENCY_TYPE,
        Severity::High,
    ),
];

struct PatternRule {
    regex: Regex,
    indicator_type: &'static str,
    severity: Severity,
}

/// Keyword and pattern based content analysis.
pub struct ContentAnalyzer {
    patterns: Vec<PatternRule>,
    subject_heuristic: SubjectHeuristic,
}

impl ContentAnalyzer {
    /// Compile the built-in pattern table.
    pub fn new(subject_heuristic: SubjectHeuristic) -> Result<Self, regex::Error> {
        let patterns = PATTERN_TABLE
            .iter()
            .map(|&(pattern, indicator_type, severity)| {
                Regex::new(pattern).map(|regex| PatternRule {
                    regex,
                    indicator_type,
                    severity,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            patterns,
            subject_heuristic,
        })
    }

    /// Run every pass over `content` and collect the indicators in detection order.
    ///
    /// Empty content is fine: it simply produces the short-content indicator
    /// (and possibly the random subject one).
    pub fn analyze<R: Rng + ?Sized>(&self, content: &str, rng: &mut R) -> Vec<SpamIndicator> {
        let mut indicators = Vec::new();

        if let Some(indicator) = Self::keyword_indicator(content) {
            indicators.push(indicator);
        }

        indicators.extend(self.pattern_indicators(content));

        if let Some(indicator) = Self::length_indicator(content) {
            indicators.push(indicator);
        }

        if let Some(indicator) = self.subject_indicator(rng) {
            indicators.push(indicator);
        }

        tracing::debug!(
            indicators = indicators.len(),
            chars = content.chars().count(),
            "Content analysis finished"
        );

        indicators
    }

    fn keyword_indicator(content: &str) -> Option<SpamIndicator> {
        let upper = content.to_uppercase();
        let found: Vec<&str> = SPAM_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| upper.contains(keyword))
            .collect();

        if found.is_empty() {
            return None;
        }

        let severity = if found.len() > 2 {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(SpamIndicator::detected(
            SPAM_KEYWORDS_TYPE,
            format!("Contains suspicious keywords: {}", found.join(", ")),
            severity,
        ))
    }

    fn pattern_indicators<'a>(
        &'a self,
        content: &'a str,
    ) -> impl Iterator<Item = SpamIndicator> + 'a {
        self.patterns.iter().filter_map(move |rule| {
            let matches = rule.regex.find_iter(content).count();
            (matches > 0).then(|| {
                SpamIndicator::detected(
                    rule.indicator_type,
                    format!(
                        "Found {} instance(s) of {}",
                        matches,
                        rule.indicator_type.to_lowercase()
                    ),
                    rule.severity,
                )
            })
        })
    }

    fn length_indicator(content: &str) -> Option<SpamIndicator> {
        (content.chars().count() < SHORT_CONTENT_CHARS).then(|| {
            SpamIndicator::detected(
                SHORT_CONTENT_TYPE,
                "Email content is unusually short",
                Severity::Low,
            )
        })
    }

    // Not a real signal: nothing here looks at a subject line.
    fn subject_indicator<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<SpamIndicator> {
        let SubjectHeuristic::Randomized { probability } = self.subject_heuristic else {
            return None;
        };

        rng.gen_bool(probability.clamp(0.0, 1.0)).then(|| {
            SpamIndicator::detected(
                SUSPICIOUS_SUBJECT_TYPE,
                "Subject line contains spam-like patterns",
                Severity::Medium,
            )
        })
    }
}
