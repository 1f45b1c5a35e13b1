//! Answer records and their tally.
//!
//! An answer is correct, incorrect, or timed out (`selectedOption == -1`).
//! Timed-out answers count toward the total but are reported separately.

use serde::{Deserialize, Serialize};

use crate::error::{InputErrorKind, IqError, Result};
use crate::model::{ScoreInput, TestLevel};

/// Option index recorded when the timer ran out before an answer was chosen
pub const TIMED_OUT_OPTION: i32 = -1;

/// One answered question as submitted by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    /// Index of the chosen option, or [`TIMED_OUT_OPTION`]
    pub selected_option: i32,
    pub correct_answer: i32,
    /// Item difficulty (1-10) from the question bank
    pub difficulty: f64,
    /// Seconds spent on the question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_used: Option<u32>,
}

impl AnswerRecord {
    #[must_use]
    pub const fn outcome(&self) -> AnswerOutcome {
        if self.selected_option == self.correct_answer {
            AnswerOutcome::Correct
        } else if self.selected_option == TIMED_OUT_OPTION {
            AnswerOutcome::TimedOut
        } else {
            AnswerOutcome::Incorrect
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    TimedOut,
}

/// Counts and averages over one submission's answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionTally {
    pub correct: u32,
    pub incorrect: u32,
    pub timed_out: u32,
    pub total: u32,
    /// Percentage of correct answers, rounded to an integer
    pub score: u32,
    /// Mean item difficulty of the answered questions
    pub average_difficulty: f64,
}

impl SubmissionTally {
    /// Tally a non-empty list of answers.
    pub fn from_answers(answers: &[AnswerRecord]) -> Result<Self> {
        if answers.is_empty() {
            return Err(IqError::invalid_input(
                "submission",
                InputErrorKind::EmptySubmission,
            ));
        }
        let total = u32::try_from(answers.len()).map_err(|_| {
            IqError::validation(format!("submission has too many answers ({})", answers.len()))
        })?;

        let (mut correct, mut incorrect, mut timed_out) = (0u32, 0u32, 0u32);
        for answer in answers {
            match answer.outcome() {
                AnswerOutcome::Correct => correct += 1,
                AnswerOutcome::Incorrect => incorrect += 1,
                AnswerOutcome::TimedOut => timed_out += 1,
            }
        }

        let difficulty_sum: f64 = answers.iter().map(|a| a.difficulty).sum();
        let score = ((f64::from(correct) / f64::from(total)) * 100.0).round() as u32;

        Ok(Self {
            correct,
            incorrect,
            timed_out,
            total,
            score,
            average_difficulty: difficulty_sum / f64::from(total),
        })
    }

    /// Scoring input for this tally at the given test level
    pub fn score_input(&self, test_level: TestLevel) -> Result<ScoreInput> {
        ScoreInput::new(self.correct, self.total, self.average_difficulty, test_level)
    }
}
