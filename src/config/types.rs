//! Configuration types for raven-iq.

use crate::error::Result;
use crate::model::{Classification, TestLevel};
use crate::reports::ReportFormat;
use crate::scoring::{
    ClassificationBand, ClassificationTable, IqEstimator, PercentileStep, PercentileTable,
    ScoringTables,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Percentile reported below the lowest configured step when none is given
const DEFAULT_PERCENTILE_FLOOR: f64 = 1.0;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or
/// config files, with CLI arguments overriding file settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring configuration (test level, table overrides)
    pub scoring: ScoringConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the estimator this configuration describes.
    ///
    /// Uses the built-in tables unless `scoring.tables` overrides them.
    pub fn estimator(&self) -> Result<IqEstimator> {
        match &self.scoring.tables {
            Some(tables) => Ok(IqEstimator::new(tables.to_scoring_tables()?)),
            None => Ok(IqEstimator::default()),
        }
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Scoring-related configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Test level used when a command or submission does not name one
    pub default_test_level: TestLevel,
    /// Replacement lookup tables (omit to use the built-in ones)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<TablesConfig>,
}

/// Lookup tables as written in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TablesConfig {
    /// Classification bands, in any order; the lowest one catches every IQ
    /// below the others
    pub classification: Vec<ClassificationBandConfig>,
    /// Percentile step function
    pub percentile: PercentileConfig,
}

/// One classification band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClassificationBandConfig {
    /// Lowest IQ in the band
    pub threshold: i32,
    pub level: String,
    pub description: String,
    /// Reference percentile of the band (0-100)
    #[schemars(range(min = 0, max = 100))]
    pub percentile: f64,
    #[serde(default)]
    pub emoji: String,
}

/// Percentile table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PercentileConfig {
    pub steps: Vec<PercentileStepConfig>,
    /// Percentile below the lowest step
    #[serde(default = "default_percentile_floor")]
    #[schemars(range(min = 0, max = 100))]
    pub floor: f64,
}

/// IQs at or above `threshold` sit at `percentile`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PercentileStepConfig {
    pub threshold: i32,
    #[schemars(range(min = 0, max = 100))]
    pub percentile: f64,
}

const fn default_percentile_floor() -> f64 {
    DEFAULT_PERCENTILE_FLOOR
}

impl TablesConfig {
    /// Validate and convert into estimator tables.
    pub fn to_scoring_tables(&self) -> Result<ScoringTables> {
        let bands = self
            .classification
            .iter()
            .map(|band| {
                ClassificationBand::new(
                    band.threshold,
                    Classification::new(
                        band.level.clone(),
                        band.description.clone(),
                        band.percentile,
                        band.emoji.clone(),
                    ),
                )
            })
            .collect();
        let steps = self
            .percentile
            .steps
            .iter()
            .map(|step| PercentileStep {
                threshold: step.threshold,
                percentile: step.percentile,
            })
            .collect();

        Ok(ScoringTables::new(
            ClassificationTable::new(bands)?,
            PercentileTable::new(steps, self.percentile.floor)?,
        ))
    }
}

impl From<&ScoringTables> for TablesConfig {
    fn from(tables: &ScoringTables) -> Self {
        Self {
            classification: tables
                .classification
                .iter()
                .map(|band| ClassificationBandConfig {
                    threshold: band.threshold,
                    level: band.classification.level.clone(),
                    description: band.classification.description.clone(),
                    percentile: band.classification.percentile,
                    emoji: band.classification.emoji.clone(),
                })
                .collect(),
            percentile: PercentileConfig {
                steps: tables
                    .percentile
                    .steps()
                    .iter()
                    .map(|step| PercentileStepConfig {
                        threshold: step.threshold,
                        percentile: step.percentile,
                    })
                    .collect(),
                floor: tables.percentile.floor(),
            },
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_builtin_tables() {
        let estimator = AppConfig::default().estimator().unwrap();
        assert_eq!(estimator.tables(), ScoringTables::standard());
    }

    #[test]
    fn test_tables_config_round_trip() {
        let standard = ScoringTables::standard();
        let config = TablesConfig::from(standard);
        assert_eq!(config.classification.len(), 7);
        assert_eq!(config.percentile.steps.len(), 13);
        assert_eq!(&config.to_scoring_tables().unwrap(), standard);
    }

    #[test]
    fn test_custom_tables_drive_estimator() {
        let config = AppConfig {
            scoring: ScoringConfig {
                tables: Some(TablesConfig {
                    classification: vec![
                        ClassificationBandConfig {
                            threshold: 100,
                            level: "High".to_string(),
                            description: "Above the median".to_string(),
                            percentile: 50.0,
                            emoji: String::new(),
                        },
                        ClassificationBandConfig {
                            threshold: 0,
                            level: "Low".to_string(),
                            description: "Below the median".to_string(),
                            percentile: 10.0,
                            emoji: String::new(),
                        },
                    ],
                    percentile: PercentileConfig {
                        steps: vec![PercentileStepConfig {
                            threshold: 100,
                            percentile: 50.0,
                        }],
                        floor: 5.0,
                    },
                }),
                ..ScoringConfig::default()
            },
            ..AppConfig::default()
        };

        let estimator = config.estimator().unwrap();
        assert_eq!(estimator.classification(150).level, "High");
        assert_eq!(estimator.classification(99).level, "Low");
        assert_eq!(estimator.percentile(99), 5.0);
    }

    #[test]
    fn test_empty_classification_rejected() {
        let tables = TablesConfig {
            classification: Vec::new(),
            percentile: PercentileConfig {
                steps: Vec::new(),
                floor: 1.0,
            },
        };
        assert!(tables.to_scoring_tables().is_err());
    }
}
