//! IQ scoring core.
//!
//! Turns a completed test's raw results into an IQ estimate, a percentile
//! rank and a qualitative classification, bounded to 60-200.
//!
//! # Usage
//!
//! ```
//! use raven_iq::model::TestLevel;
//! use raven_iq::scoring::IqEstimator;
//!
//! let estimator = IqEstimator::default();
//! let result = estimator.calculate_iq(9, 12, 5.0, TestLevel::Standard)?;
//!
//! assert_eq!(result.iq, 112);
//! assert_eq!(result.classification.level, "Moyen supérieur");
//! for line in estimator.personalized_advice(result.iq, TestLevel::Standard) {
//!     println!("{line}");
//! }
//! # Ok::<(), raven_iq::IqError>(())
//! ```

mod advice;
mod estimator;
mod tables;

pub use advice::personalized_advice;
pub use estimator::{
    ESTIMATOR_VERSION, IQ_CEILING, IQ_FLOOR, IqEstimator, base_iq, difficulty_multiplier,
    round_iq,
};
pub use tables::{
    ClassificationBand, ClassificationTable, PercentileStep, PercentileTable, ScoringTables,
    TableDivergence,
};
