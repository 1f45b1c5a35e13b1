use serde::{Deserialize, Serialize};

use super::TestLevel;
use crate::error::{InputErrorKind, IqError, Result};

/// Lowest accepted average item difficulty
pub const MIN_DIFFICULTY: f64 = 0.0;
/// Highest accepted average item difficulty
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Raw results of one completed test, validated at construction.
///
/// Holding a `ScoreInput` guarantees `total_questions > 0`,
/// `correct_answers <= total_questions` and a finite difficulty in
/// `[MIN_DIFFICULTY, MAX_DIFFICULTY]`, so the scorer never divides by zero
/// or produces `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawScoreInput")]
pub struct ScoreInput {
    correct_answers: u32,
    total_questions: u32,
    avg_difficulty: f64,
    test_level: TestLevel,
}

impl ScoreInput {
    /// Validate and build a scoring input.
    pub fn new(
        correct_answers: u32,
        total_questions: u32,
        avg_difficulty: f64,
        test_level: TestLevel,
    ) -> Result<Self> {
        if total_questions == 0 {
            return Err(IqError::invalid_input(
                "score input",
                InputErrorKind::NoQuestions,
            ));
        }
        if correct_answers > total_questions {
            return Err(IqError::invalid_input(
                "score input",
                InputErrorKind::CorrectExceedsTotal {
                    correct: correct_answers,
                    total: total_questions,
                },
            ));
        }
        if !avg_difficulty.is_finite()
            || !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&avg_difficulty)
        {
            return Err(IqError::invalid_input(
                "score input",
                InputErrorKind::DifficultyOutOfRange(avg_difficulty),
            ));
        }

        Ok(Self {
            correct_answers,
            total_questions,
            avg_difficulty,
            test_level,
        })
    }

    #[must_use]
    pub const fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub const fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub const fn avg_difficulty(&self) -> f64 {
        self.avg_difficulty
    }

    #[must_use]
    pub const fn test_level(&self) -> TestLevel {
        self.test_level
    }

    /// Percentage of correct answers (0-100)
    #[must_use]
    pub fn raw_score(&self) -> f64 {
        (f64::from(self.correct_answers) / f64::from(self.total_questions)) * 100.0
    }
}

/// Unvalidated wire shape of [`ScoreInput`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoreInput {
    correct_answers: u32,
    total_questions: u32,
    avg_difficulty: f64,
    #[serde(default)]
    test_level: TestLevel,
}

impl TryFrom<RawScoreInput> for ScoreInput {
    type Error = IqError;

    fn try_from(raw: RawScoreInput) -> Result<Self> {
        Self::new(
            raw.correct_answers,
            raw.total_questions,
            raw.avg_difficulty,
            raw.test_level,
        )
    }
}
