//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{IqLookup, ReportError, ReportFormat, ReportGenerator, ScoreReport};
use crate::model::{Classification, PopulationComparison};
use crate::scoring::ScoringTables;
use crate::session::{HistorySummary, TestReport};

const RULE_WIDTH: usize = 44;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Percentiles print without a trailing ".0"
fn format_percentile(percentile: f64) -> String {
    if percentile.fract() == 0.0 {
        format!("{percentile:.0}")
    } else {
        format!("{percentile:.1}")
    }
}

const fn iq_color(iq: i32) -> &'static str {
    match iq {
        110.. => "green",
        90..=109 => "cyan",
        80..=89 => "yellow",
        _ => "red",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn header(&self, lines: &mut Vec<String>, title: &str) {
        lines.push(self.color(title, "bold"));
        lines.push(self.color("─".repeat(RULE_WIDTH).as_str(), "dim"));
    }

    fn label(&self, label: &str) -> String {
        self.color(&format!("{label:<12}"), "cyan")
    }

    fn iq_lines(
        &self,
        lines: &mut Vec<String>,
        iq: i32,
        classification: &Classification,
        percentile: f64,
    ) {
        lines.push(format!(
            "{} {}  {} {}",
            self.label("IQ:"),
            self.color(&iq.to_string(), iq_color(iq)),
            classification.emoji,
            self.color(&classification.level, "bold"),
        ));
        lines.push(format!("{:<12} {}", "", classification.description));
        lines.push(format!(
            "{} {}",
            self.label("Percentile:"),
            format_percentile(percentile)
        ));
    }

    fn advice_lines(
        &self,
        lines: &mut Vec<String>,
        advice: &[String],
        comparison: &PopulationComparison,
    ) {
        lines.push(String::new());
        lines.push(self.color("Advice:", "bold"));
        for line in advice {
            lines.push(format!("  • {line}"));
        }
        lines.push(String::new());
        lines.push(format!(
            "{} {}",
            self.label("Population:"),
            comparison.description
        ));
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_score_report(&self, report: &ScoreReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let result = &report.result;
        self.header(&mut lines, "IQ Estimate");
        self.iq_lines(&mut lines, result.iq, &result.classification, result.percentile);
        lines.push(format!(
            "{} {:.1}% ({}/{})",
            self.label("Raw score:"),
            result.raw_score,
            report.input.correct_answers(),
            report.input.total_questions()
        ));
        lines.push(format!(
            "{} {:.1} ({} test)",
            self.label("Difficulty:"),
            result.difficulty,
            report.input.test_level()
        ));

        if let (Some(advice), Some(comparison)) = (&report.advice, &report.population_comparison)
        {
            self.advice_lines(&mut lines, advice, comparison);
        }

        Ok(lines.join("\n"))
    }

    fn generate_test_report(&self, report: &TestReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Test Result");
        lines.push(format!(
            "{} {}% ({}/{} correct)",
            self.label("Score:"),
            report.score,
            report.correct_answers,
            report.total_questions
        ));
        if report.timed_out > 0 {
            lines.push(format!(
                "{} {}",
                self.label("Timed out:"),
                self.color(&report.timed_out.to_string(), "yellow")
            ));
        }
        lines.push(format!(
            "{} {:.1} ({} test)",
            self.label("Difficulty:"),
            report.difficulty,
            report.test_level
        ));
        lines.push(String::new());
        self.iq_lines(&mut lines, report.iq, &report.classification, report.percentile);
        self.advice_lines(&mut lines, &report.advice, &report.population_comparison);

        Ok(lines.join("\n"))
    }

    fn generate_history_report(&self, summary: &HistorySummary) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        self.header(&mut lines, "Test History");

        if summary.tests.is_empty() {
            lines.push(self.color("No tests recorded", "dim"));
        }
        for entry in &summary.tests {
            let iq = entry.iq.map_or_else(
                || self.color("  -", "dim"),
                |iq| self.color(&format!("{iq:>3}"), iq_color(iq)),
            );
            let level = entry
                .classification
                .as_ref()
                .map_or("", |c| c.level.as_str());
            lines.push(format!(
                "{}  {:<8} {:<8} {:>5.1}%  IQ {}  {}",
                entry.date.format("%Y-%m-%d %H:%M"),
                entry.test_type,
                entry.test_level,
                entry.score,
                iq,
                level
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} {:.1}%",
            self.label("Average:"),
            summary.average_score
        ));
        lines.push(format!(
            "{} {}",
            self.label("Verdict:"),
            summary.interpretation
        ));
        if summary.backfilled > 0 {
            lines.push(self.color(
                &format!("{} IQ estimate(s) computed from stored answers", summary.backfilled),
                "dim",
            ));
        }

        Ok(lines.join("\n"))
    }

    fn generate_lookup_report(&self, lookups: &[IqLookup]) -> Result<String, ReportError> {
        let lines: Vec<String> = lookups
            .iter()
            .map(|lookup| {
                format!(
                    "IQ {}  {} {:<18} percentile {}",
                    self.color(&format!("{:>3}", lookup.iq), iq_color(lookup.iq)),
                    lookup.classification.emoji,
                    lookup.classification.level,
                    format_percentile(lookup.percentile)
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn generate_tables_report(&self, tables: &ScoringTables) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        self.header(&mut lines, "Classification");
        for band in tables.classification.iter() {
            let c = &band.classification;
            lines.push(format!(
                "  ≥{:>3}  {} {:<18} {:>5}  {}",
                band.threshold,
                c.emoji,
                c.level,
                format_percentile(c.percentile),
                self.color(&c.description, "dim")
            ));
        }

        lines.push(String::new());
        self.header(&mut lines, "Percentiles");
        for step in tables.percentile.steps() {
            lines.push(format!(
                "  ≥{:>3}  {:>5}",
                step.threshold,
                format_percentile(step.percentile)
            ));
        }
        lines.push(format!(
            "  else  {:>5}",
            format_percentile(tables.percentile.floor())
        ));

        let divergences = tables.divergences();
        if !divergences.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Tables disagree at:", "yellow"));
            for d in &divergences {
                lines.push(format!(
                    "  {:>3}  {:<18} band {} / table {}",
                    d.threshold,
                    d.level,
                    format_percentile(d.classification_percentile),
                    format_percentile(d.percentile_table_value)
                ));
            }
        }

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScoreInput, TestLevel};
    use crate::scoring::IqEstimator;

    fn plain() -> SummaryReporter {
        SummaryReporter::new().no_color()
    }

    #[test]
    fn test_format_percentile() {
        assert_eq!(format_percentile(75.0), "75");
        assert_eq!(format_percentile(99.9), "99.9");
        assert_eq!(format_percentile(0.1), "0.1");
    }

    #[test]
    fn test_score_summary_without_color() {
        let estimator = IqEstimator::default();
        let input = ScoreInput::new(9, 12, 5.0, TestLevel::Standard).unwrap();
        let report = ScoreReport::new(input, estimator.score(&input)).with_advice(&estimator);

        let text = plain().generate_score_report(&report).unwrap();
        assert!(text.contains("IQ Estimate"));
        assert!(text.contains("112"));
        assert!(text.contains("Moyen supérieur"));
        assert!(text.contains("75.0% (9/12)"));
        assert!(text.contains("Vous avez un score supérieur à 75% de la population"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let lookups = [IqLookup::new(&IqEstimator::default(), 125)];
        let text = SummaryReporter::new().generate_lookup_report(&lookups).unwrap();
        assert!(text.contains("\x1b[32m"));
        assert!(text.contains("Supérieur"));
    }

    #[test]
    fn test_tables_summary_mentions_divergences() {
        let text = plain()
            .generate_tables_report(ScoringTables::standard())
            .unwrap();
        assert!(text.contains("Tables disagree at:"));
        assert!(text.contains("band 50 / table 25"));
        assert!(text.contains("else      1"));
    }

    #[test]
    fn test_empty_history_summary() {
        let summary = IqEstimator::default().summarize_history(Vec::new());
        let text = plain().generate_history_report(&summary).unwrap();
        assert!(text.contains("No tests recorded"));
        assert!(text.contains("À améliorer - Performance faible"));
    }
}
