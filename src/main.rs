//! Headless versus runner (default binary).
//!
//! Plays one computer-vs-computer round and prints a JSON summary to stdout.
//! Usage: `tetris-versus [config.json]`. Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetris_versus::core::logger;
use tetris_versus::headless::{run_round, VersusConfig};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => VersusConfig::default(),
    };

    info!(
        seats = config.seats.len(),
        seed = config.seed,
        frame_ms = config.frame_ms,
        "starting headless round"
    );

    let summary = run_round(&config, logger::tracing_logger());

    info!(
        frames = summary.frames,
        outcome = ?summary.outcome,
        "round finished"
    );

    let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
    println!("{json}");
    Ok(())
}

fn load_config(path: &Path) -> Result<VersusConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}
