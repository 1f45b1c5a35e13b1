//! Stored test history.
//!
//! Summaries average the recorded scores and estimate IQs for entries saved
//! before estimates were stored, rescoring their answers in parallel.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::report::{TestReport, TestSubmission};
use super::tally::{AnswerRecord, SubmissionTally};
use crate::error::Result;
use crate::model::{Classification, TestLevel};
use crate::scoring::IqEstimator;

/// Interpretation bands for the average score, descending
const INTERPRETATIONS: [(f64, &str); 5] = [
    (90.0, "Excellent - Performance remarquable"),
    (80.0, "Très bon - Au-dessus de la moyenne"),
    (70.0, "Bon - Performance satisfaisante"),
    (60.0, "Correct - Dans la moyenne"),
    (50.0, "À améliorer - En dessous de la moyenne"),
];
const LOWEST_INTERPRETATION: &str = "À améliorer - Performance faible";

/// One stored test in a user's history.
///
/// Entries recorded before IQ estimation existed have no `iq`; they are
/// rescored from their answers when the history is summarized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub test_type: String,
    #[serde(default)]
    pub test_level: TestLevel,
    /// Percentage of correct answers
    pub score: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iq: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
}

impl HistoryEntry {
    /// Record to persist for a freshly evaluated submission
    pub fn from_report(
        submission: &TestSubmission,
        report: &TestReport,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            test_type: submission.test_type.clone(),
            test_level: report.test_level,
            score: f64::from(report.score),
            date,
            answers: submission.answers.clone(),
            iq: Some(report.iq),
            classification: Some(report.classification.clone()),
            difficulty: Some(report.difficulty),
        }
    }

    /// Whether the entry still needs an IQ estimate
    #[must_use]
    pub const fn needs_backfill(&self) -> bool {
        self.iq.is_none()
    }
}

/// A user's history with derived statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct HistorySummary {
    pub tests: Vec<HistoryEntry>,
    pub average_score: f64,
    pub interpretation: String,
    /// Entries that received an IQ during this summary
    pub backfilled: usize,
}

/// Verbal interpretation of an average score
#[must_use]
pub fn interpretation(average_score: f64) -> &'static str {
    INTERPRETATIONS
        .iter()
        .find(|(min, _)| average_score >= *min)
        .map_or(LOWEST_INTERPRETATION, |(_, text)| text)
}

impl IqEstimator {
    /// Summarize a history, estimating IQs for entries that lack one.
    ///
    /// Entries whose answers cannot be scored are kept as they are.
    pub fn summarize_history(&self, entries: Vec<HistoryEntry>) -> HistorySummary {
        let pending = entries.iter().filter(|e| e.needs_backfill()).count();
        let tests: Vec<HistoryEntry> = entries
            .into_par_iter()
            .map(|entry| self.backfill(entry))
            .collect();
        let backfilled = pending - tests.iter().filter(|e| e.needs_backfill()).count();

        let average_score = if tests.is_empty() {
            0.0
        } else {
            tests.iter().map(|t| t.score).sum::<f64>() / tests.len() as f64
        };

        tracing::debug!(
            entries = tests.len(),
            backfilled,
            average_score,
            "summarized history"
        );

        HistorySummary {
            tests,
            average_score,
            interpretation: interpretation(average_score).to_string(),
            backfilled,
        }
    }

    fn backfill(&self, mut entry: HistoryEntry) -> HistoryEntry {
        if !entry.needs_backfill() {
            return entry;
        }
        match self.rescore(&entry) {
            Ok((iq, classification, difficulty)) => {
                entry.iq = Some(iq);
                entry.classification = Some(classification);
                entry.difficulty = Some(difficulty);
            }
            Err(e) => {
                tracing::warn!(
                    "Could not estimate IQ for {} test from {}: {e}",
                    entry.test_type,
                    entry.date
                );
            }
        }
        entry
    }

    fn rescore(&self, entry: &HistoryEntry) -> Result<(i32, Classification, f64)> {
        let tally = SubmissionTally::from_answers(&entry.answers)?;
        let result = self.score(&tally.score_input(entry.test_level)?);
        Ok((result.iq, result.classification, tally.average_difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(score: f64, iq: Option<i32>, answers: Vec<AnswerRecord>) -> HistoryEntry {
        HistoryEntry {
            test_type: "raven".to_string(),
            test_level: TestLevel::Standard,
            score,
            date: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            answers,
            iq,
            classification: None,
            difficulty: None,
        }
    }

    fn answers(correct: usize, total: usize, difficulty: f64) -> Vec<AnswerRecord> {
        (0..total)
            .map(|i| AnswerRecord {
                question_id: format!("q{i}"),
                selected_option: i32::from(i >= correct),
                correct_answer: 0,
                difficulty,
                time_used: None,
            })
            .collect()
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(interpretation(95.0), "Excellent - Performance remarquable");
        assert_eq!(interpretation(90.0), "Excellent - Performance remarquable");
        assert_eq!(interpretation(85.0), "Très bon - Au-dessus de la moyenne");
        assert_eq!(interpretation(70.0), "Bon - Performance satisfaisante");
        assert_eq!(interpretation(65.0), "Correct - Dans la moyenne");
        assert_eq!(interpretation(50.0), "À améliorer - En dessous de la moyenne");
        assert_eq!(interpretation(10.0), "À améliorer - Performance faible");
    }

    #[test]
    fn test_empty_history() {
        let summary = IqEstimator::default().summarize_history(Vec::new());
        assert!(summary.tests.is_empty());
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.interpretation, "À améliorer - Performance faible");
        assert_eq!(summary.backfilled, 0);
    }

    #[test]
    fn test_backfills_missing_iq() {
        let estimator = IqEstimator::default();
        let history = vec![
            entry(75.0, None, answers(9, 12, 5.0)),
            entry(80.0, Some(118), Vec::new()),
        ];
        let summary = estimator.summarize_history(history);

        assert_eq!(summary.backfilled, 1);
        assert_eq!(summary.tests[0].iq, Some(112));
        assert_eq!(
            summary.tests[0].classification.as_ref().map(|c| c.level.as_str()),
            Some("Moyen supérieur")
        );
        assert_eq!(summary.tests[0].difficulty, Some(5.0));
        // Already-scored entries stay untouched
        assert_eq!(summary.tests[1].iq, Some(118));
        assert!(summary.tests[1].classification.is_none());
        assert!((summary.average_score - 77.5).abs() < f64::EPSILON);
        assert_eq!(summary.interpretation, "Bon - Performance satisfaisante");
    }

    #[test]
    fn test_unscorable_entry_kept() {
        let summary =
            IqEstimator::default().summarize_history(vec![entry(40.0, None, Vec::new())]);
        assert_eq!(summary.backfilled, 0);
        assert!(summary.tests[0].iq.is_none());
    }

    #[test]
    fn test_from_report_round_trips_into_summary() {
        let estimator = IqEstimator::default();
        let submission = TestSubmission {
            test_type: "raven".to_string(),
            test_level: Some(TestLevel::Full),
            answers: answers(10, 12, 7.0),
        };
        let report = estimator.evaluate(&submission).unwrap();
        let date = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
        let stored = HistoryEntry::from_report(&submission, &report, date);

        assert_eq!(stored.iq, Some(report.iq));
        assert_eq!(stored.test_level, TestLevel::Full);
        assert_eq!(stored.score, f64::from(report.score));
        assert!(!stored.needs_backfill());
    }
}
