//! JSON report generator.

use super::{IqLookup, ReportError, ReportFormat, ReportGenerator, ScoreReport};
use crate::scoring::{ESTIMATOR_VERSION, ScoringTables, TableDivergence};
use crate::session::{HistorySummary, TestReport};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator; output is pretty-printed
#[derive(Debug, Default)]
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn render<T: Serialize>(&self, body: &T) -> Result<String, ReportError> {
        let document = JsonDocument {
            metadata: JsonReportMetadata::now(),
            body,
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_score_report(&self, report: &ScoreReport) -> Result<String, ReportError> {
        self.render(report)
    }

    fn generate_test_report(&self, report: &TestReport) -> Result<String, ReportError> {
        self.render(report)
    }

    fn generate_history_report(&self, summary: &HistorySummary) -> Result<String, ReportError> {
        self.render(summary)
    }

    fn generate_lookup_report(&self, lookups: &[IqLookup]) -> Result<String, ReportError> {
        self.render(&LookupBody { lookups })
    }

    fn generate_tables_report(&self, tables: &ScoringTables) -> Result<String, ReportError> {
        self.render(&TablesBody {
            tables,
            divergences: tables.divergences(),
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON document structures
// ============================================================================

#[derive(Serialize)]
struct JsonDocument<'a, T: Serialize> {
    metadata: JsonReportMetadata,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata {
    tool: ToolInfo,
    estimator_version: &'static str,
    generated_at: String,
}

impl JsonReportMetadata {
    fn now() -> Self {
        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            estimator_version: ESTIMATOR_VERSION,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct LookupBody<'a> {
    lookups: &'a [IqLookup],
}

#[derive(Serialize)]
struct TablesBody<'a> {
    tables: &'a ScoringTables,
    divergences: Vec<TableDivergence>,
}
