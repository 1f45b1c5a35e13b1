//! Property-based tests for the scoring core.
//!
//! Ensures the estimator honors its bounds and ordering guarantees across
//! random valid inputs, and rejects invalid ones without panicking.

use proptest::prelude::*;
use raven_iq::scoring::{IQ_CEILING, IQ_FLOOR};
use raven_iq::session::{AnswerRecord, SubmissionTally, TIMED_OUT_OPTION};
use raven_iq::{IqEstimator, TestLevel};

fn test_level() -> impl Strategy<Value = TestLevel> {
    prop_oneof![
        Just(TestLevel::Short),
        Just(TestLevel::Standard),
        Just(TestLevel::Full),
    ]
}

/// (correct, total) with correct <= total
fn counts() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=200).prop_flat_map(|total| (0..=total, Just(total)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn iq_is_clamped(
        (correct, total) in counts(),
        difficulty in 0.0f64..=10.0,
        level in test_level(),
    ) {
        let result = IqEstimator::default()
            .calculate_iq(correct, total, difficulty, level)
            .unwrap();
        prop_assert!((IQ_FLOOR..=IQ_CEILING).contains(&result.iq));
        prop_assert!((0.0..=100.0).contains(&result.raw_score));
    }

    #[test]
    fn scoring_is_idempotent(
        (correct, total) in counts(),
        difficulty in 0.0f64..=10.0,
        level in test_level(),
    ) {
        let estimator = IqEstimator::default();
        let first = estimator.calculate_iq(correct, total, difficulty, level).unwrap();
        let second = estimator.calculate_iq(correct, total, difficulty, level).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn iq_non_decreasing_in_correct_answers(
        total in 1u32..=100,
        difficulty in 0.0f64..=10.0,
        level in test_level(),
    ) {
        let estimator = IqEstimator::default();
        let mut previous = IQ_FLOOR;
        for correct in 0..=total {
            let iq = estimator.calculate_iq(correct, total, difficulty, level).unwrap().iq;
            prop_assert!(
                iq >= previous,
                "iq dropped from {} to {} at {}/{}",
                previous,
                iq,
                correct,
                total
            );
            previous = iq;
        }
    }

    #[test]
    fn every_reportable_iq_is_classified(iq in IQ_FLOOR..=IQ_CEILING) {
        let estimator = IqEstimator::default();
        prop_assert!(!estimator.classification(iq).level.is_empty());
        let percentile = estimator.percentile(iq);
        prop_assert!((1.0..=99.9).contains(&percentile));

        let comparison = estimator.population_comparison(iq);
        prop_assert!((0..=100).contains(&comparison.better_than));
    }

    #[test]
    fn invalid_counts_rejected(total in 0u32..=100, extra in 1u32..=50, difficulty in 0.0f64..=10.0) {
        let result = IqEstimator::default()
            .calculate_iq(total + extra, total, difficulty, TestLevel::Standard);
        prop_assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn out_of_range_difficulty_rejected(difficulty in prop_oneof![-1e6f64..-0.001, 10.001f64..1e6]) {
        let result = IqEstimator::default().calculate_iq(5, 10, difficulty, TestLevel::Standard);
        prop_assert!(result.is_err());
    }

    #[test]
    fn tally_counts_partition_answers(
        outcomes in prop::collection::vec((0i32..4, -1i32..4, 1.0f64..=10.0), 1..60),
    ) {
        let answers: Vec<AnswerRecord> = outcomes
            .iter()
            .enumerate()
            .map(|(i, &(correct_answer, selected_option, difficulty))| AnswerRecord {
                question_id: format!("q{i}"),
                selected_option,
                correct_answer,
                difficulty,
                time_used: None,
            })
            .collect();

        let tally = SubmissionTally::from_answers(&answers).unwrap();
        prop_assert_eq!(tally.correct + tally.incorrect + tally.timed_out, tally.total);
        prop_assert_eq!(tally.total as usize, answers.len());
        let timed_out = answers.iter().filter(|a| a.selected_option == TIMED_OUT_OPTION).count();
        prop_assert_eq!(tally.timed_out as usize, timed_out);
        prop_assert!(tally.score <= 100);
        prop_assert!(tally.score_input(TestLevel::Standard).is_ok());
    }
}
