//! Read-only lookup tables used by the estimator.
//!
//! The classification table (7 bands) and the percentile table (13 steps)
//! overlap but do not agree everywhere. Both are part of the scoring contract
//! and are kept independent; [`ScoringTables::divergences`] lists where they
//! disagree.

use serde::{Serialize, Serializer};
use std::sync::LazyLock;

use crate::error::{IqError, Result};
use crate::model::Classification;

/// Built-in classification bands, descending thresholds.
/// (threshold, level, description, percentile, emoji)
const CLASSIFICATION_BANDS: [(i32, &str, &str, f64, &str); 7] = [
    (130, "Très supérieur", "Intelligence exceptionnelle", 98.0, "🧠✨"),
    (120, "Supérieur", "Intelligence remarquable", 91.0, "🎯"),
    (110, "Moyen supérieur", "Intelligence au-dessus de la moyenne", 75.0, "📈"),
    (90, "Moyen", "Intelligence dans la moyenne", 50.0, "✅"),
    (80, "Moyen inférieur", "Intelligence en dessous de la moyenne", 16.0, "📊"),
    (70, "Limite", "Intelligence à la limite", 2.0, "⚠️"),
    (0, "Déficient", "Intelligence déficiente", 0.1, "🔻"),
];

/// Built-in percentile steps, descending thresholds.
const PERCENTILE_STEPS: [(i32, f64); 13] = [
    (145, 99.9),
    (130, 98.0),
    (120, 91.0),
    (115, 84.0),
    (110, 75.0),
    (105, 63.0),
    (100, 50.0),
    (95, 37.0),
    (90, 25.0),
    (85, 16.0),
    (80, 9.0),
    (75, 5.0),
    (70, 2.0),
];

/// Percentile reported below the lowest step
const PERCENTILE_FLOOR: f64 = 1.0;

static STANDARD_TABLES: LazyLock<ScoringTables> = LazyLock::new(ScoringTables::builtin);

// ============================================================================
// Classification table
// ============================================================================

/// One classification band: every IQ at or above `threshold` (and below the
/// next band up) gets `classification`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationBand {
    pub threshold: i32,
    #[serde(flatten)]
    pub classification: Classification,
}

impl ClassificationBand {
    pub const fn new(threshold: i32, classification: Classification) -> Self {
        Self {
            threshold,
            classification,
        }
    }
}

/// Classification bands ordered by descending threshold.
///
/// The lowest band is held apart and doubles as the catch-all for IQs below
/// every threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationTable {
    bands: Vec<ClassificationBand>,
    floor: ClassificationBand,
}

impl ClassificationTable {
    /// Build a table from bands in any order.
    ///
    /// Rejects empty tables, duplicate thresholds, empty labels and
    /// percentiles outside 0-100.
    pub fn new(mut bands: Vec<ClassificationBand>) -> Result<Self> {
        for band in &bands {
            if band.classification.level.trim().is_empty() {
                return Err(IqError::config(format!(
                    "classification band {} has an empty level",
                    band.threshold
                )));
            }
            if !is_percentage(band.classification.percentile) {
                return Err(IqError::config(format!(
                    "classification band {} has percentile {} outside 0-100",
                    band.threshold, band.classification.percentile
                )));
            }
        }

        bands.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        if let Some(pair) = bands.windows(2).find(|w| w[0].threshold == w[1].threshold) {
            return Err(IqError::config(format!(
                "duplicate classification threshold {}",
                pair[0].threshold
            )));
        }

        let floor = bands
            .pop()
            .ok_or_else(|| IqError::config("classification table has no bands"))?;
        Ok(Self { bands, floor })
    }

    /// Classification for `iq`: the first band whose threshold is `<= iq`,
    /// or the lowest band when none matches.
    #[must_use]
    pub fn lookup(&self, iq: i32) -> &Classification {
        self.bands
            .iter()
            .find(|band| band.threshold <= iq)
            .map_or(&self.floor.classification, |band| &band.classification)
    }

    /// All bands, highest threshold first
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationBand> {
        self.bands.iter().chain(std::iter::once(&self.floor))
    }
}

impl Serialize for ClassificationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

// ============================================================================
// Percentile table
// ============================================================================

/// IQs at or above `threshold` sit at `percentile`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileStep {
    pub threshold: i32,
    pub percentile: f64,
}

/// Step function from IQ to population percentile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileTable {
    steps: Vec<PercentileStep>,
    floor: f64,
}

impl PercentileTable {
    /// Build a table from steps in any order plus the value used below the
    /// lowest step.
    ///
    /// Percentiles must lie in 0-100 and must not decrease as the threshold
    /// rises.
    pub fn new(mut steps: Vec<PercentileStep>, floor: f64) -> Result<Self> {
        if !is_percentage(floor) {
            return Err(IqError::config(format!(
                "percentile floor {floor} outside 0-100"
            )));
        }
        if let Some(step) = steps.iter().find(|s| !is_percentage(s.percentile)) {
            return Err(IqError::config(format!(
                "percentile step {} has value {} outside 0-100",
                step.threshold, step.percentile
            )));
        }

        steps.sort_by(|a, b| b.threshold.cmp(&a.threshold));
        for pair in steps.windows(2) {
            if pair[0].threshold == pair[1].threshold {
                return Err(IqError::config(format!(
                    "duplicate percentile threshold {}",
                    pair[0].threshold
                )));
            }
            if pair[0].percentile < pair[1].percentile {
                return Err(IqError::config(format!(
                    "percentile decreases from threshold {} to {}",
                    pair[1].threshold, pair[0].threshold
                )));
            }
        }
        if let Some(lowest) = steps.last()
            && lowest.percentile < floor
        {
            return Err(IqError::config(format!(
                "percentile floor {floor} exceeds lowest step {}",
                lowest.percentile
            )));
        }

        Ok(Self { steps, floor })
    }

    /// Percentile for `iq`
    #[must_use]
    pub fn lookup(&self, iq: i32) -> f64 {
        self.steps
            .iter()
            .find(|step| step.threshold <= iq)
            .map_or(self.floor, |step| step.percentile)
    }

    /// Steps, highest threshold first
    #[must_use]
    pub fn steps(&self) -> &[PercentileStep] {
        &self.steps
    }

    #[must_use]
    pub const fn floor(&self) -> f64 {
        self.floor
    }
}

// ============================================================================
// Combined tables
// ============================================================================

/// A classification band whose reference percentile disagrees with the
/// percentile table at the band's threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDivergence {
    pub threshold: i32,
    pub level: String,
    pub classification_percentile: f64,
    pub percentile_table_value: f64,
}

/// The lookup tables an [`IqEstimator`](super::IqEstimator) scores with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringTables {
    pub classification: ClassificationTable,
    pub percentile: PercentileTable,
}

impl ScoringTables {
    pub const fn new(classification: ClassificationTable, percentile: PercentileTable) -> Self {
        Self {
            classification,
            percentile,
        }
    }

    /// The built-in contract tables, initialised once per process
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD_TABLES
    }

    // The constants are already sorted and distinct, so no re-validation.
    fn builtin() -> Self {
        let [higher @ .., lowest] = CLASSIFICATION_BANDS;
        let steps = PERCENTILE_STEPS
            .iter()
            .map(|&(threshold, percentile)| PercentileStep {
                threshold,
                percentile,
            })
            .collect();

        Self {
            classification: ClassificationTable {
                bands: higher.into_iter().map(builtin_band).collect(),
                floor: builtin_band(lowest),
            },
            percentile: PercentileTable {
                steps,
                floor: PERCENTILE_FLOOR,
            },
        }
    }

    /// Bands whose own percentile differs from the percentile table's value
    /// at the band threshold.
    #[must_use]
    pub fn divergences(&self) -> Vec<TableDivergence> {
        self.classification
            .iter()
            .filter_map(|band| {
                let table_value = self.percentile.lookup(band.threshold);
                let band_value = band.classification.percentile;
                ((band_value - table_value).abs() > f64::EPSILON).then(|| TableDivergence {
                    threshold: band.threshold,
                    level: band.classification.level.clone(),
                    classification_percentile: band_value,
                    percentile_table_value: table_value,
                })
            })
            .collect()
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self::standard().clone()
    }
}

fn builtin_band(
    (threshold, level, description, percentile, emoji): (
        i32,
        &'static str,
        &'static str,
        f64,
        &'static str,
    ),
) -> ClassificationBand {
    ClassificationBand::new(
        threshold,
        Classification::new(level, description, percentile, emoji),
    )
}

fn is_percentage(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(threshold: i32, level: &str, percentile: f64) -> ClassificationBand {
        ClassificationBand::new(threshold, Classification::new(level, "desc", percentile, "*"))
    }

    #[test]
    fn test_standard_classification_order() {
        let thresholds: Vec<i32> = ScoringTables::standard()
            .classification
            .iter()
            .map(|b| b.threshold)
            .collect();
        assert_eq!(thresholds, vec![130, 120, 110, 90, 80, 70, 0]);
    }

    #[test]
    fn test_standard_classification_boundaries() {
        let table = &ScoringTables::standard().classification;
        assert_eq!(table.lookup(130).level, "Très supérieur");
        assert_eq!(table.lookup(129).level, "Supérieur");
        assert_eq!(table.lookup(90).level, "Moyen");
        assert_eq!(table.lookup(89).level, "Moyen inférieur");
        assert_eq!(table.lookup(70).level, "Limite");
        assert_eq!(table.lookup(69).level, "Déficient");
        assert_eq!(table.lookup(0).level, "Déficient");
        assert_eq!(table.lookup(-5).level, "Déficient");
    }

    #[test]
    fn test_standard_percentiles() {
        let table = &ScoringTables::standard().percentile;
        assert_eq!(table.lookup(200), 99.9);
        assert_eq!(table.lookup(145), 99.9);
        assert_eq!(table.lookup(144), 98.0);
        assert_eq!(table.lookup(100), 50.0);
        assert_eq!(table.lookup(99), 37.0);
        assert_eq!(table.lookup(70), 2.0);
        assert_eq!(table.lookup(69), 1.0);
    }

    #[test]
    fn test_custom_table_sorted_on_build() {
        let table = ClassificationTable::new(vec![
            band(0, "low", 1.0),
            band(100, "high", 60.0),
            band(50, "mid", 20.0),
        ])
        .unwrap();
        let order: Vec<i32> = table.iter().map(|b| b.threshold).collect();
        assert_eq!(order, vec![100, 50, 0]);
        assert_eq!(table.lookup(75).level, "mid");
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn test_lookup_below_lowest_band_uses_floor() {
        let table = ClassificationTable::new(vec![band(80, "ok", 10.0), band(60, "low", 1.0)])
            .unwrap();
        assert_eq!(table.lookup(10).level, "low");
    }

    #[test]
    fn test_classification_table_rejects_bad_input() {
        assert!(ClassificationTable::new(vec![]).is_err());
        assert!(ClassificationTable::new(vec![band(10, "a", 1.0), band(10, "b", 2.0)]).is_err());
        assert!(ClassificationTable::new(vec![band(10, " ", 1.0)]).is_err());
        assert!(ClassificationTable::new(vec![band(10, "a", 101.0)]).is_err());
    }

    #[test]
    fn test_percentile_table_validation() {
        let step = |threshold, percentile| PercentileStep {
            threshold,
            percentile,
        };
        assert!(PercentileTable::new(vec![step(100, 50.0), step(120, 90.0)], 1.0).is_ok());
        assert!(PercentileTable::new(vec![], 5.0).is_ok());
        assert!(PercentileTable::new(vec![step(100, 50.0), step(120, 40.0)], 1.0).is_err());
        assert!(PercentileTable::new(vec![step(100, 50.0), step(100, 50.0)], 1.0).is_err());
        assert!(PercentileTable::new(vec![step(100, 50.0)], 60.0).is_err());
        assert!(PercentileTable::new(vec![step(100, f64::NAN)], 1.0).is_err());
    }

    #[test]
    fn test_standard_tables_divergences() {
        let thresholds: Vec<i32> = ScoringTables::standard()
            .divergences()
            .iter()
            .map(|d| d.threshold)
            .collect();
        assert_eq!(thresholds, vec![90, 80, 0]);
    }

    #[test]
    fn test_classification_table_serializes_flat() {
        let json = serde_json::to_value(&ScoringTables::standard().classification).unwrap();
        let first = &json[0];
        assert_eq!(first["threshold"], 130);
        assert_eq!(first["level"], "Très supérieur");
        assert_eq!(json.as_array().map(Vec::len), Some(7));
    }
}
