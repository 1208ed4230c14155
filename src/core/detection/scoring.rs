// Scoring - aggregates indicators into a confidence value and a verdict.
//
// This is a coarse heuristic, not a calibrated probability:
// each indicator adds its severity weight, a uniform jitter is added on top,
// and the result is clamped to [0, 1].

use super::detection_models::SpamIndicator;
use rand::Rng;

/// Sum the severity weights, add jitter in [-jitter, +jitter] and clamp to [0, 1].
pub fn score<R: Rng + ?Sized>(indicators: &[SpamIndicator], jitter: f64, rng: &mut R) -> f64 {
    let base: f64 = indicators.iter().map(|i| i.severity.weight()).sum();

    let noise = if jitter > 0.0 {
        rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    };

    (base + noise).clamp(0.0, 1.0)
}

/// Strictly greater than the threshold is spam; the threshold itself is legitimate.
pub fn is_spam(score: f64, threshold: f64) -> bool {
    score > threshold
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::detection::detection_models::Severity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn indicators(severities: &[Severity]) -> Vec<SpamIndicator> {
        severities
            .iter()
            .map(|s| SpamIndicator::detected("Test", "test indicator", *s))
            .collect()
    }

    #[test]
    fn test_score_without_jitter() {
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(score(&[], 0.0, &mut rng), 0.0);

        let s = score(&indicators(&[Severity::High, Severity::Medium]), 0.0, &mut rng);
        assert!((s - 0.5).abs() < 1e-9);

        let s = score(&indicators(&[Severity::Low]), 0.0, &mut rng);
        assert!((s - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_clamped() {
        let mut rng = StdRng::seed_from_u64(0);
        let many = indicators(&[Severity::High; 6]);

        for _ in 0..100 {
            assert_eq!(score(&many, 0.1, &mut rng), 1.0);
            assert!(score(&[], 0.1, &mut rng) >= 0.0);
        }
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let medium = indicators(&[Severity::Medium, Severity::Medium]);

        for _ in 0..1000 {
            let s = score(&medium, 0.1, &mut rng);
            assert!((0.3 - 1e-9..=0.5 + 1e-9).contains(&s), "score {s} out of jitter range");
        }

        for _ in 0..1000 {
            let s = score(&[], 0.1, &mut rng);
            assert!((0.0..=0.1 + 1e-9).contains(&s), "score {s} out of range");
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!is_spam(0.6, 0.6));
        assert!(is_spam(0.61, 0.6));
        assert!(!is_spam(0.0, 0.6));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(0.454), 0.45);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
