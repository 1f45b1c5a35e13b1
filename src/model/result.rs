use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Qualitative label attached to an IQ band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Classification {
    /// Short label, e.g. "Supérieur"
    pub level: String,
    /// One-line description of the band
    pub description: String,
    /// Reference percentile of the band
    pub percentile: f64,
    /// Display glyph
    pub emoji: String,
}

impl Classification {
    pub fn new(
        level: impl Into<String>,
        description: impl Into<String>,
        percentile: f64,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            description: description.into(),
            percentile,
            emoji: emoji.into(),
        }
    }
}

/// Outcome of scoring one [`ScoreInput`](super::ScoreInput)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct ScoreResult {
    /// Estimated IQ, clamped to 60-200
    pub iq: i32,
    /// Classification band of `iq`
    pub classification: Classification,
    /// Percentage of correct answers (0-100)
    pub raw_score: f64,
    /// Average item difficulty the estimate was computed with
    pub difficulty: f64,
    /// Population percentile of `iq`
    pub percentile: f64,
}

/// How an IQ compares with the general population
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationComparison {
    /// Rounded share of the population scoring lower
    pub better_than: i32,
    /// Rounded share of the population scoring higher
    pub worse_than: i32,
    pub description: String,
}
