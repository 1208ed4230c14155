// This is the entry point of the spam detector.
//
// **Architecture Overview:**
// - `core/` = Business logic (analysis, scoring, statistics)
// - `infra/` = Implementations of core traits (the history log)
// - `console/` = Command line adapter (argument parsing, input, rendering)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize the detection service (dependency injection)
// 3. Hand the input to the service and print what comes back

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "console/console_layer.rs"]
mod console;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::console::formatter::{
    format_json, format_result, format_samples, format_statistics, RECENT_RESULTS_SHOWN,
};
use crate::console::session::run_session;
use crate::console::{Cli, ContentSource};
use crate::core::detection::{
    DetectorConfig, HistoryStore, SpamDetectionService, SubjectHeuristic,
};
use crate::infra::detection::InMemoryHistoryStore;
use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Parse an optional env value, falling back to `default` when it is missing or garbage.
fn parse_env<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using the default", name, value);
            default
        }),
    }
}

fn env_value<T: std::str::FromStr>(name: &str, default: T) -> T {
    parse_env(name, std::env::var(name).ok(), default)
}

/// Build the detector config from defaults plus environment overrides.
fn detector_config_from_env() -> DetectorConfig {
    let mut config = DetectorConfig::default();

    if !env_value("SPAM_DETECTOR_SIMULATE_DELAY", true) {
        config.simulated_delay = None;
    }
    if !env_value("SPAM_DETECTOR_SUBJECT_HEURISTIC", true) {
        config.subject_heuristic = SubjectHeuristic::Disabled;
    }

    config
}

/// Optional fixed seed for reproducible runs.
fn seed_from_env() -> Option<u64> {
    let raw = std::env::var("SPAM_DETECTOR_SEED").ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            tracing::warn!("Ignoring invalid SPAM_DETECTOR_SEED={:?}", raw);
            None
        }
    }
}

async fn print_statistics<S: HistoryStore>(
    service: &SpamDetectionService<S>,
    json: bool,
) -> anyhow::Result<()> {
    let stats = service.statistics().await?;

    if json {
        println!("{}", format_json(&stats)?);
    } else {
        let recent = service.recent(RECENT_RESULTS_SHOWN).await?;
        println!("{}", format_statistics(&stats, &recent));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Logs go to stderr so they never mix with results on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_samples {
        print!("{}", format_samples());
        return Ok(());
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // One engine, one history log, shared by everything below.

    let config = detector_config_from_env();
    let seed = seed_from_env();

    let store = InMemoryHistoryStore::new();
    let service = match seed {
        Some(seed) => SpamDetectionService::with_rng(store, config, StdRng::seed_from_u64(seed)),
        None => SpamDetectionService::new(store, config),
    }
    .context("Failed to initialize the spam detector")?;

    tracing::debug!(config = ?service.config(), seeded = seed.is_some(), "Detector ready");

    if cli.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run_session(&service, stdin, cli.json).await?;
        return print_statistics(&service, cli.json).await;
    }

    let content = ContentSource::from_cli(&cli).read().await?;
    let result = service.detect(&content).await?;

    if cli.json {
        println!("{}", format_json(&result)?);
    } else {
        println!("{}", format_result(&result));
    }

    if cli.stats {
        print_statistics(&service, cli.json).await?;
    }

    Ok(())
}
