//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod classify;
mod history;
mod score;
mod submit;

pub use classify::{ClassifyConfig, run_classify};
pub use history::{HistoryConfig, run_history};
pub use score::{ScoreConfig, run_score};
pub use submit::{SubmitConfig, run_submit};

use crate::config::OutputConfig;
use crate::pipeline::{OutputTarget, auto_detect_format, should_use_color, write_output};
use crate::reports::{ReportError, ReportGenerator, create_reporter_with_options};
use anyhow::Result;

/// Render a report in the configured format and write it to the configured
/// destination.
fn emit_report<F>(output: &OutputConfig, quiet: bool, render: F) -> Result<()>
where
    F: FnOnce(&dyn ReportGenerator) -> std::result::Result<String, ReportError>,
{
    let target = OutputTarget::from_option(output.file.clone());
    let format = auto_detect_format(output.format, &target);
    let reporter = create_reporter_with_options(format, should_use_color(output.no_color, &target));
    let content = render(reporter.as_ref())?;
    write_output(&content, &target, quiet)
}
