// Interactive session - analyze several emails from one stream.
//
// Emails are separated by one or more blank lines. Every email goes through
// the same detection service, so they all land in the same history log.

use super::formatter::{format_json, format_result};
use crate::core::detection::{DetectionResult, HistoryStore, SpamDetectionService};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Read emails from `reader` until EOF, analyzing each block as soon as it ends.
///
/// Prints every result and returns them in the order they were analyzed.
pub async fn run_session<S, R>(
    service: &SpamDetectionService<S>,
    reader: R,
    json: bool,
) -> anyhow::Result<Vec<DetectionResult>>
where
    S: HistoryStore,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut block: Vec<String> = Vec::new();
    let mut results = Vec::new();

    loop {
        let line = lines.next_line().await?;
        let at_end = line.is_none();

        match line {
            Some(line) if !line.trim().is_empty() => {
                block.push(line);
                continue;
            }
            _ => {}
        }

        if !block.is_empty() {
            let email = block.join("\n");
            block.clear();

            let result = service.detect(&email).await?;
            if json {
                println!("{}", format_json(&result)?);
            } else {
                println!("{}", format_result(&result));
            }
            results.push(result);
        }

        if at_end {
            break;
        }
    }

    tracing::debug!(emails = results.len(), "Interactive session finished");

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::detection::DetectorConfig;
    use crate::infra::detection::InMemoryHistoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_session_shares_history() {
        let service = SpamDetectionService::with_rng(
            InMemoryHistoryStore::new(),
            DetectorConfig::deterministic(),
            StdRng::seed_from_u64(4),
        )
        .unwrap();

        let input: &[u8] = b"Hi John, see you tomorrow.\n\nFREE FREE FREE WINNER CASH PRIZE!!! http://x.com\n";
        let results = run_session(&service, input, false).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(!results[0].is_spam);
        assert!(results[1].is_spam);

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, results[1].id);
    }

    #[tokio::test]
    async fn test_session_with_no_input() {
        let service = SpamDetectionService::with_rng(
            InMemoryHistoryStore::new(),
            DetectorConfig::deterministic(),
            StdRng::seed_from_u64(4),
        )
        .unwrap();

        let input: &[u8] = b"\n   \n";
        let results = run_session(&service, input, true).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(service.statistics().await.unwrap().total_emails, 0);
    }
}
