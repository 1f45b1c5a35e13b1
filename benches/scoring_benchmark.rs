//! Benchmarks for the IQ estimator and history backfill.

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use raven_iq::session::{AnswerRecord, HistoryEntry};
use raven_iq::{IqEstimator, TestLevel};
use std::hint::black_box;

fn history(entries: usize) -> Vec<HistoryEntry> {
    let answers: Vec<AnswerRecord> = (0..40)
        .map(|i| AnswerRecord {
            question_id: format!("q{i}"),
            selected_option: i % 3,
            correct_answer: 0,
            difficulty: f64::from(i % 10) + 0.5,
            time_used: Some(30),
        })
        .collect();
    let date = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default();

    (0..entries)
        .map(|_| HistoryEntry {
            test_type: "raven".to_string(),
            test_level: TestLevel::Full,
            score: 33.0,
            date,
            answers: answers.clone(),
            iq: None,
            classification: None,
            difficulty: None,
        })
        .collect()
}

fn benchmark_calculate_iq(c: &mut Criterion) {
    let estimator = IqEstimator::default();
    c.bench_function("calculate_iq", |b| {
        b.iter(|| {
            estimator.calculate_iq(
                black_box(9),
                black_box(12),
                black_box(5.0),
                black_box(TestLevel::Standard),
            )
        });
    });
}

fn benchmark_history_backfill(c: &mut Criterion) {
    let estimator = IqEstimator::default();
    let mut group = c.benchmark_group("summarize_history");
    for size in [10, 1_000] {
        let entries = history(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| estimator.summarize_history(black_box(entries.clone())));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_calculate_iq, benchmark_history_backfill);
criterion_main!(benches);
