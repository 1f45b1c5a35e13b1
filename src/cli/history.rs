//! History command handler.
//!
//! Implements the `history` subcommand: summarizes a stored history and fills
//! in IQ estimates for tests recorded without one.

use super::emit_report;
use crate::config::OutputConfig;
use crate::pipeline::{exit_codes, read_history};
use crate::scoring::IqEstimator;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// History command configuration
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub history_path: PathBuf,
    /// Write backfilled estimates back into the history file
    pub update: bool,
    pub output: OutputConfig,
    pub quiet: bool,
}

/// Run the history command, returning the desired exit code.
pub fn run_history(estimator: &IqEstimator, config: HistoryConfig) -> Result<i32> {
    let entries = read_history(&config.history_path)?;
    let summary = estimator.summarize_history(entries);

    if config.update && summary.backfilled > 0 {
        let json = serde_json::to_string_pretty(&summary.tests)
            .context("Failed to serialize history")?;
        std::fs::write(&config.history_path, json).with_context(|| {
            format!(
                "Failed to update history {}",
                config.history_path.display()
            )
        })?;
        if !config.quiet {
            tracing::info!(
                "Stored {} new IQ estimate(s) in {}",
                summary.backfilled,
                config.history_path.display()
            );
        }
    }

    emit_report(&config.output, config.quiet, |reporter| {
        reporter.generate_history_report(&summary)
    })?;

    Ok(exit_codes::SUCCESS)
}
