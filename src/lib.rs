//! **IQ estimation for Raven-style progressive matrices quizzes.**
//!
//! `raven-iq` turns the raw results of a completed quiz (correct answers, total
//! questions, average item difficulty and test length tier) into an estimated
//! IQ bounded to 60-200, a population percentile, a qualitative classification,
//! personalized advice and a comparison with the general population.
//!
//! The result is an engagement-grade estimate, not a psychometric measurement.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: inputs and outputs: [`ScoreInput`], [`TestLevel`],
//!   [`ScoreResult`], [`Classification`].
//! - **[`scoring`]**: the [`IqEstimator`] and the read-only [`ScoringTables`]
//!   it looks classifications and percentiles up in.
//! - **[`session`]**: tallies submitted answers into a [`TestReport`] and
//!   summarizes stored histories, estimating IQs for old entries.
//! - **[`config`]**: YAML configuration, including optional table overrides.
//! - **[`reports`]**: summary and JSON renderers.
//!
//! ## Getting Started
//!
//! ```
//! use raven_iq::{IqEstimator, TestLevel};
//!
//! let estimator = IqEstimator::default();
//! let result = estimator.calculate_iq(12, 12, 3.0, TestLevel::Standard)?;
//!
//! assert_eq!(result.iq, 155);
//! assert_eq!(result.classification.level, "Très supérieur");
//! assert_eq!(result.percentile, 99.9);
//! # Ok::<(), raven_iq::IqError>(())
//! ```
//!
//! Invalid inputs are rejected before any arithmetic:
//!
//! ```
//! use raven_iq::{InputErrorKind, IqEstimator, TestLevel};
//!
//! let err = IqEstimator::default()
//!     .calculate_iq(0, 0, 3.0, TestLevel::Standard)
//!     .unwrap_err();
//! assert_eq!(err.input_kind(), Some(&InputErrorKind::NoQuestions));
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `raven-iq` binary wraps the library: `score`, `submit`, `history`,
//! `classify` and configuration helpers.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Percentages and IQs are small bounded values
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod session;

// Re-export main types for convenience
pub use config::{AppConfig, ConfigError, OutputConfig, ScoringConfig, Validatable};
pub use error::{ErrorContext, InputErrorKind, IqError, Result};
pub use model::{Classification, PopulationComparison, ScoreInput, ScoreResult, TestLevel};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{IqEstimator, ScoringTables, personalized_advice};
pub use session::{
    AnswerRecord, HistoryEntry, HistorySummary, TestReport, TestSubmission, interpretation,
};
