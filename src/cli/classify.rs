//! Classify command handler.
//!
//! Implements the `classify` subcommand: looks IQ values up in the tables, or
//! prints the tables themselves when no value is given.

use super::emit_report;
use crate::config::OutputConfig;
use crate::pipeline::exit_codes;
use crate::reports::IqLookup;
use crate::scoring::IqEstimator;
use anyhow::Result;

/// Classify command configuration
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    pub iqs: Vec<i32>,
    pub output: OutputConfig,
    pub quiet: bool,
}

/// Run the classify command, returning the desired exit code.
pub fn run_classify(estimator: &IqEstimator, config: ClassifyConfig) -> Result<i32> {
    if config.iqs.is_empty() {
        emit_report(&config.output, config.quiet, |reporter| {
            reporter.generate_tables_report(estimator.tables())
        })?;
    } else {
        let lookups: Vec<IqLookup> = config
            .iqs
            .iter()
            .map(|&iq| IqLookup::new(estimator, iq))
            .collect();
        emit_report(&config.output, config.quiet, |reporter| {
            reporter.generate_lookup_report(&lookups)
        })?;
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    fn run_to_json(iqs: Vec<i32>) -> serde_json::Value {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.json");
        let config = ClassifyConfig {
            iqs,
            output: OutputConfig {
                format: ReportFormat::Json,
                file: Some(path.clone()),
                no_color: true,
            },
            quiet: true,
        };
        run_classify(&IqEstimator::default(), config).unwrap();
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_classify_values() {
        let json = run_to_json(vec![145, 95]);
        assert_eq!(json["lookups"][0]["classification"]["level"], "Très supérieur");
        assert_eq!(json["lookups"][0]["percentile"], 99.9);
        assert_eq!(json["lookups"][1]["classification"]["level"], "Moyen");
        assert_eq!(json["lookups"][1]["percentile"], 37.0);
    }

    #[test]
    fn test_classify_without_values_prints_tables() {
        let json = run_to_json(Vec::new());
        assert!(json["tables"]["classification"].is_array());
        assert!(json["divergences"].is_array());
    }
}
