//! Score command handler.
//!
//! Implements the `score` subcommand: one IQ estimate from raw counts.

use super::emit_report;
use crate::config::OutputConfig;
use crate::model::{ScoreInput, TestLevel};
use crate::pipeline::exit_codes;
use crate::reports::ScoreReport;
use crate::scoring::IqEstimator;
use anyhow::{Context, Result};

/// Score command configuration
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub correct_answers: u32,
    pub total_questions: u32,
    pub avg_difficulty: f64,
    pub test_level: TestLevel,
    /// Attach advice and population comparison
    pub advice: bool,
    pub output: OutputConfig,
    /// Exit with [`exit_codes::BELOW_THRESHOLD`] when the IQ is lower
    pub min_iq: Option<i32>,
    pub quiet: bool,
}

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(estimator: &IqEstimator, config: ScoreConfig) -> Result<i32> {
    let input = ScoreInput::new(
        config.correct_answers,
        config.total_questions,
        config.avg_difficulty,
        config.test_level,
    )
    .context("Cannot score these results")?;

    let result = estimator.score(&input);
    let iq = result.iq;
    let mut report = ScoreReport::new(input, result);
    if config.advice {
        report = report.with_advice(estimator);
    }

    emit_report(&config.output, config.quiet, |reporter| {
        reporter.generate_score_report(&report)
    })?;

    Ok(check_min_iq(iq, config.min_iq))
}

/// Exit code for `iq` against an optional minimum
pub(super) fn check_min_iq(iq: i32, min_iq: Option<i32>) -> i32 {
    match min_iq {
        Some(threshold) if iq < threshold => {
            tracing::error!("IQ {iq} is below minimum threshold {threshold}");
            exit_codes::BELOW_THRESHOLD
        }
        _ => exit_codes::SUCCESS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    fn config(correct: u32, total: u32, output: OutputConfig) -> ScoreConfig {
        ScoreConfig {
            correct_answers: correct,
            total_questions: total,
            avg_difficulty: 5.0,
            test_level: TestLevel::Standard,
            advice: true,
            output,
            min_iq: None,
            quiet: true,
        }
    }

    #[test]
    fn test_check_min_iq() {
        assert_eq!(check_min_iq(100, None), exit_codes::SUCCESS);
        assert_eq!(check_min_iq(100, Some(100)), exit_codes::SUCCESS);
        assert_eq!(check_min_iq(99, Some(100)), exit_codes::BELOW_THRESHOLD);
    }

    #[test]
    fn test_run_score_writes_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("score.json");
        let output = OutputConfig {
            format: ReportFormat::Json,
            file: Some(path.clone()),
            no_color: true,
        };

        let mut cfg = config(9, 12, output);
        cfg.min_iq = Some(130);
        let code = run_score(&IqEstimator::default(), cfg).unwrap();
        assert_eq!(code, exit_codes::BELOW_THRESHOLD);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["iq"], 112);
        assert_eq!(json["advice"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_run_score_rejects_bad_counts() {
        let err = run_score(
            &IqEstimator::default(),
            config(13, 12, OutputConfig::default()),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("correct answers (13) exceed total questions (12)"));
    }
}
