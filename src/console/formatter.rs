use crate::core::detection::samples::SAMPLE_EMAILS;
use crate::core::detection::{DetectionResult, Severity, Statistics};
use serde::Serialize;
use std::fmt::Write;

/// How many recent results the statistics view lists.
pub const RECENT_RESULTS_SHOWN: usize = 5;

/// Fixed-width "[HIGH]" style tag so descriptions line up.
fn severity_badge(severity: Severity) -> String {
    format!("{:<8}", format!("[{}]", severity.to_string().to_uppercase()))
}

fn verdict(is_spam: bool) -> &'static str {
    if is_spam {
        "🚨 SPAM DETECTED"
    } else {
        "✅ LEGITIMATE"
    }
}

/// Cut a single-line preview for list views.
fn one_line(content: &str, max_chars: usize) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() > max_chars {
        format!("{}…", flat.chars().take(max_chars).collect::<String>())
    } else {
        flat
    }
}

pub fn format_result(result: &DetectionResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", verdict(result.is_spam));
    let _ = writeln!(out, "Confidence:      {:.0}%", result.confidence * 100.0);
    let _ = writeln!(out, "Processing time: {} ms", result.processing_time);
    let _ = writeln!(out, "Content length:  {} chars", result.content.chars().count());
    let _ = writeln!(out, "Analyzed at:     {}", result.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Result id:       {}", result.id);

    if result.indicators.is_empty() {
        let _ = writeln!(out, "\nNo spam indicators found.");
    } else {
        let _ = writeln!(out, "\nIndicators ({}):", result.indicators.len());
        for indicator in &result.indicators {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                severity_badge(indicator.severity),
                indicator.indicator_type,
                indicator.description
            );
        }
    }

    out
}

pub fn format_statistics(stats: &Statistics, recent: &[DetectionResult]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📊 Detection Statistics");
    let _ = writeln!(out, "Emails analyzed:     {}", stats.total_emails);
    let _ = writeln!(out, "Spam detected:       {}", stats.spam_detected);
    let _ = writeln!(out, "Average confidence:  {:.2}", stats.average_confidence);
    let _ = writeln!(out, "Spam rate:           {:.1}%", stats.spam_rate());
    let _ = writeln!(out, "Legitimate rate:     {:.1}%", stats.legitimate_rate());

    if !stats.most_common_indicators.is_empty() {
        let _ = writeln!(out, "\nMost common indicators:");
        for (rank, indicator_type) in stats.most_common_indicators.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", rank + 1, indicator_type);
        }
    }

    if !recent.is_empty() {
        let _ = writeln!(out, "\nRecent analyses:");
        for result in recent.iter().take(RECENT_RESULTS_SHOWN) {
            let _ = writeln!(
                out,
                "  {} {:>3.0}%  {}",
                if result.is_spam { "SPAM" } else { "OK  " },
                result.confidence * 100.0,
                one_line(&result.content, 60)
            );
        }
    }

    out
}

pub fn format_samples() -> String {
    let mut out = String::new();
    for (index, sample) in SAMPLE_EMAILS.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, sample);
    }
    out
}

pub fn format_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
