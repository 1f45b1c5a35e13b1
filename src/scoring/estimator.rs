//! IQ estimation engine.
//!
//! Converts a validated [`ScoreInput`] into a [`ScoreResult`]:
//!
//! 1. raw score = correct / total × 100
//! 2. base IQ from a piecewise-linear curve over the raw score
//! 3. base × difficulty multiplier × test-level multiplier
//! 4. clamp to 60-200, round half away from zero
//! 5. classification and percentile looked up from the rounded IQ

use crate::error::Result;
use crate::model::{Classification, ScoreInput, ScoreResult, TestLevel};

use super::tables::ScoringTables;

/// Estimation engine version, reported alongside results
pub const ESTIMATOR_VERSION: &str = "1.0";

/// Lowest IQ the estimator reports
pub const IQ_FLOOR: i32 = 60;
/// Highest IQ the estimator reports
pub const IQ_CEILING: i32 = 200;

/// Difficulty step function, descending: (minimum average difficulty, multiplier)
const DIFFICULTY_MULTIPLIERS: [(f64, f64); 4] = [(8.0, 1.3), (6.0, 1.2), (4.0, 1.1), (2.0, 1.0)];
/// Multiplier for average difficulty below 2
const EASY_DIFFICULTY_MULTIPLIER: f64 = 0.9;

/// One linear piece of the raw-score to IQ curve:
/// `base + (raw - from) * slope` for raw scores at or above `from`.
#[derive(Debug, Clone, Copy)]
struct CurveSegment {
    from: f64,
    base: f64,
    slope: f64,
}

/// Steep at the top, flat in the middle-low range; approximates a normal
/// distribution with mean 100 and SD 15. Descending, first match wins.
const BASE_IQ_CURVE: [CurveSegment; 6] = [
    CurveSegment { from: 95.0, base: 140.0, slope: 3.0 },
    CurveSegment { from: 85.0, base: 115.0, slope: 2.5 },
    CurveSegment { from: 70.0, base: 95.0, slope: 1.33 },
    CurveSegment { from: 50.0, base: 85.0, slope: 0.5 },
    CurveSegment { from: 30.0, base: 75.0, slope: 0.5 },
    CurveSegment { from: 0.0, base: 60.0, slope: 0.5 },
];

/// Multiplier rewarding harder question sets
#[must_use]
pub fn difficulty_multiplier(avg_difficulty: f64) -> f64 {
    DIFFICULTY_MULTIPLIERS
        .iter()
        .find(|&&(min, _)| avg_difficulty >= min)
        .map_or(EASY_DIFFICULTY_MULTIPLIER, |&(_, multiplier)| multiplier)
}

/// Base IQ for a raw score (0-100), before multipliers
#[must_use]
pub fn base_iq(raw_score: f64) -> f64 {
    let [.., lowest] = BASE_IQ_CURVE;
    let segment = BASE_IQ_CURVE
        .iter()
        .find(|segment| raw_score >= segment.from)
        .copied()
        .unwrap_or(lowest);
    segment.base + (raw_score - segment.from) * segment.slope
}

/// Clamp to the reported range and round half away from zero
#[must_use]
pub fn round_iq(unrounded: f64) -> i32 {
    unrounded
        .clamp(f64::from(IQ_FLOOR), f64::from(IQ_CEILING))
        .round() as i32
}

/// IQ estimator over a set of read-only lookup tables.
///
/// The tables are injected at construction; [`IqEstimator::default`] uses
/// the built-in contract tables. Every method is a pure function of its
/// arguments, so one estimator can be shared across threads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IqEstimator {
    tables: ScoringTables,
}

impl IqEstimator {
    /// Create an estimator over custom tables
    #[must_use]
    pub const fn new(tables: ScoringTables) -> Self {
        Self { tables }
    }

    /// Tables this estimator looks classifications and percentiles up in
    #[must_use]
    pub const fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Validate raw test results and estimate an IQ from them.
    ///
    /// Fails with an invalid-input error when `total_questions` is zero,
    /// `correct_answers` exceeds it, or the difficulty is outside 0-10.
    pub fn calculate_iq(
        &self,
        correct_answers: u32,
        total_questions: u32,
        avg_difficulty: f64,
        test_level: TestLevel,
    ) -> Result<ScoreResult> {
        let input = ScoreInput::new(correct_answers, total_questions, avg_difficulty, test_level)?;
        Ok(self.score(&input))
    }

    /// Estimate an IQ from an already validated input
    pub fn score(&self, input: &ScoreInput) -> ScoreResult {
        let raw_score = input.raw_score();
        let difficulty_mult = difficulty_multiplier(input.avg_difficulty());
        let level_mult = input.test_level().multiplier();
        let base = base_iq(raw_score);

        let unrounded = base * difficulty_mult * level_mult;
        let iq = round_iq(unrounded);

        tracing::debug!(
            raw_score,
            base_iq = base,
            difficulty_mult,
            level_mult,
            unrounded,
            iq,
            "estimated IQ"
        );

        ScoreResult {
            iq,
            classification: self.classification(iq).clone(),
            raw_score,
            difficulty: input.avg_difficulty(),
            percentile: self.percentile(iq),
        }
    }

    /// Classification band of `iq`
    #[must_use]
    pub fn classification(&self, iq: i32) -> &Classification {
        self.tables.classification.lookup(iq)
    }

    /// Population percentile of `iq`
    #[must_use]
    pub fn percentile(&self, iq: i32) -> f64 {
        self.tables.percentile.lookup(iq)
    }
}
