//! Value records exchanged with the scoring core.
//!
//! Everything here is a plain immutable value: an input is built once per
//! submission, validated at construction, scored, and discarded. Results
//! serialize with camelCase field names so an HTTP layer can return them as-is.

mod input;
mod level;
mod result;

pub use input::{MAX_DIFFICULTY, MIN_DIFFICULTY, ScoreInput};
pub use level::TestLevel;
pub use result::{Classification, PopulationComparison, ScoreResult};
