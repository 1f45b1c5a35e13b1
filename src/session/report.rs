//! Evaluation of a submitted test into the report shown to the client.

use serde::{Deserialize, Serialize};

use super::tally::{AnswerRecord, SubmissionTally};
use crate::error::{ErrorContext, Result};
use crate::model::{Classification, PopulationComparison, TestLevel};
use crate::scoring::IqEstimator;

/// A completed test as sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSubmission {
    /// Question set the test was drawn from, e.g. "raven"
    pub test_type: String,
    /// Level chosen by the client; absent means the caller's default applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_level: Option<TestLevel>,
    pub answers: Vec<AnswerRecord>,
}

impl TestSubmission {
    /// Named level, or `fallback` when the submission does not name one
    #[must_use]
    pub fn level_or(&self, fallback: TestLevel) -> TestLevel {
        self.test_level.unwrap_or(fallback)
    }
}

/// Everything the client shows after a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct TestReport {
    /// Percentage of correct answers, rounded
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub timed_out: u32,
    pub iq: i32,
    pub classification: Classification,
    pub percentile: f64,
    pub advice: Vec<String>,
    pub population_comparison: PopulationComparison,
    pub test_level: TestLevel,
    /// Mean item difficulty
    pub difficulty: f64,
}

impl IqEstimator {
    /// Tally a submission, score it, and attach advice and population
    /// comparison. Submissions without a level are scored as standard.
    pub fn evaluate(&self, submission: &TestSubmission) -> Result<TestReport> {
        self.evaluate_with_default(submission, TestLevel::default())
    }

    /// Like [`IqEstimator::evaluate`], scoring submissions that name no
    /// level at `default_level`.
    pub fn evaluate_with_default(
        &self,
        submission: &TestSubmission,
        default_level: TestLevel,
    ) -> Result<TestReport> {
        let test_level = submission.level_or(default_level);
        let tally = SubmissionTally::from_answers(&submission.answers)
            .with_context(|| format!("{} test", submission.test_type))?;
        let input = tally
            .score_input(test_level)
            .with_context(|| format!("{} test", submission.test_type))?;
        let result = self.score(&input);

        tracing::info!(
            test_type = %submission.test_type,
            test_level = %test_level,
            correct = tally.correct,
            total = tally.total,
            iq = result.iq,
            "scored submission"
        );

        Ok(TestReport {
            score: tally.score,
            correct_answers: tally.correct,
            total_questions: tally.total,
            timed_out: tally.timed_out,
            iq: result.iq,
            advice: self.personalized_advice(result.iq, test_level),
            population_comparison: self.population_comparison(result.iq),
            classification: result.classification,
            percentile: result.percentile,
            test_level,
            difficulty: tally.average_difficulty,
        })
    }
}
