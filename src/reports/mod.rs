//! Report generation for scoring results.
//!
//! Two output formats:
//! - Summary: colored, human-readable terminal output
//! - JSON: structured data for programmatic integration

mod json;
mod summary;
mod types;

pub use json::JsonReporter;
pub use summary::SummaryReporter;
pub use types::{IqLookup, ReportFormat, ScoreReport};

use crate::scoring::ScoringTables;
use crate::session::{HistorySummary, TestReport};
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Report for a single `score` run
    fn generate_score_report(&self, report: &ScoreReport) -> Result<String, ReportError>;

    /// Report for an evaluated submission
    fn generate_test_report(&self, report: &TestReport) -> Result<String, ReportError>;

    /// Report for a summarized history
    fn generate_history_report(&self, summary: &HistorySummary) -> Result<String, ReportError>;

    /// Report for individual IQ lookups
    fn generate_lookup_report(&self, lookups: &[IqLookup]) -> Result<String, ReportError>;

    /// Report listing the lookup tables and where they disagree
    fn generate_tables_report(&self, tables: &ScoringTables) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
