//! Submit command handler.
//!
//! Implements the `submit` subcommand: evaluates a completed test read from a
//! JSON document and optionally records it in a history file.

use super::emit_report;
use super::score::check_min_iq;
use crate::config::OutputConfig;
use crate::model::TestLevel;
use crate::pipeline::{read_history, read_submission};
use crate::scoring::IqEstimator;
use crate::session::HistoryEntry;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Submit command configuration
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    pub submission_path: PathBuf,
    /// Replaces the level named in the submission
    pub test_level: Option<TestLevel>,
    /// Level for submissions that do not name one
    pub default_test_level: TestLevel,
    /// History file to append the scored test to (created if missing)
    pub history_path: Option<PathBuf>,
    pub output: OutputConfig,
    pub min_iq: Option<i32>,
    pub quiet: bool,
}

/// Run the submit command, returning the desired exit code.
pub fn run_submit(estimator: &IqEstimator, config: SubmitConfig) -> Result<i32> {
    let mut submission = read_submission(&config.submission_path)?;
    if config.test_level.is_some() {
        submission.test_level = config.test_level;
    }

    let report = estimator
        .evaluate_with_default(&submission, config.default_test_level)
        .with_context(|| {
            format!(
                "Cannot evaluate submission {}",
                config.submission_path.display()
            )
        })?;

    if let Some(history_path) = &config.history_path {
        let entry = HistoryEntry::from_report(&submission, &report, Utc::now());
        append_history(history_path, entry)?;
        if !config.quiet {
            tracing::info!("Recorded test in {}", history_path.display());
        }
    }

    emit_report(&config.output, config.quiet, |reporter| {
        reporter.generate_test_report(&report)
    })?;

    Ok(check_min_iq(report.iq, config.min_iq))
}

fn append_history(path: &Path, entry: HistoryEntry) -> Result<()> {
    let mut entries = if path.exists() {
        read_history(path)?
    } else {
        Vec::new()
    };
    entries.push(entry);

    let json = serde_json::to_string_pretty(&entries).context("Failed to serialize history")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write history to {}", path.display()))
}
