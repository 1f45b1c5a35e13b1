//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Classification, PopulationComparison, ScoreInput, ScoreResult};
use crate::scoring::IqEstimator;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: currently always the summary
    #[default]
    Auto,
    /// Human-readable terminal summary
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// A single scoring run: the validated input, its result and, on request,
/// advice and population comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub input: ScoreInput,
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_comparison: Option<PopulationComparison>,
}

impl ScoreReport {
    pub const fn new(input: ScoreInput, result: ScoreResult) -> Self {
        Self {
            input,
            result,
            advice: None,
            population_comparison: None,
        }
    }

    /// Attach advice and population comparison computed by `estimator`
    #[must_use]
    pub fn with_advice(mut self, estimator: &IqEstimator) -> Self {
        self.advice = Some(estimator.personalized_advice(self.result.iq, self.input.test_level()));
        self.population_comparison = Some(estimator.population_comparison(self.result.iq));
        self
    }
}

/// Classification and percentile of one IQ value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IqLookup {
    pub iq: i32,
    pub classification: Classification,
    pub percentile: f64,
}

impl IqLookup {
    pub fn new(estimator: &IqEstimator, iq: i32) -> Self {
        Self {
            iq,
            classification: estimator.classification(iq).clone(),
            percentile: estimator.percentile(iq),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestLevel;

    #[test]
    fn test_format_display_matches_value_names() {
        for format in ReportFormat::value_variants() {
            let value = format.to_possible_value().unwrap();
            assert_eq!(format.to_string(), value.get_name());
        }
    }

    #[test]
    fn test_score_report_flattens_result() {
        let estimator = IqEstimator::default();
        let input = ScoreInput::new(9, 12, 5.0, TestLevel::Standard).unwrap();
        let report = ScoreReport::new(input, estimator.score(&input));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["iq"], 112);
        assert_eq!(json["input"]["correctAnswers"], 9);
        assert!(json.get("advice").is_none());

        let json = serde_json::to_value(report.with_advice(&estimator)).unwrap();
        assert_eq!(json["advice"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["populationComparison"]["betterThan"], 75);
    }

    #[test]
    fn test_lookup_below_every_band() {
        let lookup = IqLookup::new(&IqEstimator::default(), 40);
        assert_eq!(lookup.classification.level, "Déficient");
        assert_eq!(lookup.percentile, 1.0);
    }
}
