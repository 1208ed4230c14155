// Content ingestion - everything that turns user input into a plain string.
//
// The core never touches files or stdin. Blank content is rejected here,
// before it reaches the detector.

use super::args::Cli;
use crate::core::detection::samples;
use anyhow::Context;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncReadExt;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Email content is empty - paste some text or pick a file")]
    EmptyContent,

    #[error("No sample email number {0} (choose 1-{max})", max = samples::SAMPLE_EMAILS.len())]
    UnknownSample(usize),
}

/// Where a single email comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    Inline(String),
    File(PathBuf),
    Sample(usize),
    Stdin,
}

impl ContentSource {
    /// Pick the source from parsed arguments. Falls back to stdin.
    pub fn from_cli(cli: &Cli) -> Self {
        if let Some(content) = &cli.content {
            ContentSource::Inline(content.clone())
        } else if let Some(path) = &cli.file {
            ContentSource::File(path.clone())
        } else if let Some(number) = cli.sample {
            ContentSource::Sample(number as usize)
        } else {
            ContentSource::Stdin
        }
    }

    /// Load the content and make sure it is not blank.
    pub async fn read(&self) -> anyhow::Result<String> {
        let content = match self {
            ContentSource::Inline(content) => content.clone(),
            ContentSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read email file {}", path.display()))?,
            ContentSource::Sample(number) => samples::sample(*number)
                .ok_or(ConsoleError::UnknownSample(*number))?
                .to_string(),
            ContentSource::Stdin => {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .context("Failed to read email from stdin")?;
                buffer
            }
        };

        ensure_not_blank(&content)?;
        Ok(content)
    }
}

/// Reject empty or whitespace-only content.
pub fn ensure_not_blank(content: &str) -> Result<(), ConsoleError> {
    if content.trim().is_empty() {
        Err(ConsoleError::EmptyContent)
    } else {
        Ok(())
    }
}
