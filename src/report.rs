use std::path::Path;

use anes::{Attribute, Color, ResetAttributes, SetAttribute, SetForegroundColor};

use crate::analysis::Outcome;
use crate::error::Result;
use crate::estimate::Summary;
use crate::format;

/// How much the text report prints
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CliVerbosity {
    /// The verdict only
    Quiet,
    /// Mean, interval and verdict
    Normal,
    /// Everything, including the intermediate quantities
    Verbose,
}

/// Shape of the report written to stdout
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MessageFormat {
    /// Human-readable text
    Text,
    /// One JSON object per run
    Json,
}

/// Machine-readable counterpart of the text report
#[derive(Serialize)]
struct JsonMessage<'a> {
    reason: &'static str,
    column: &'a str,
    rows: usize,
    discarded: usize,
    unit: &'a str,
    summary: &'a Summary,
    margin_of_error: f64,
    reference_value: f64,
    within_interval: bool,
    chart: Option<&'a Path>,
}

/// Terminal report of one analysis
#[derive(Debug, Clone)]
pub struct CliReport {
    /// Emit ANSI colors and attributes
    pub enable_text_coloring: bool,
    /// Amount of detail in the text report
    pub verbosity: CliVerbosity,
    /// Text or JSON
    pub message_format: MessageFormat,
}

impl Default for CliReport {
    fn default() -> CliReport {
        CliReport {
            enable_text_coloring: false,
            verbosity: CliVerbosity::Normal,
            message_format: MessageFormat::Text,
        }
    }
}

impl CliReport {
    /// Creates a report with the given settings
    pub fn new(
        enable_text_coloring: bool,
        verbosity: CliVerbosity,
        message_format: MessageFormat,
    ) -> CliReport {
        CliReport {
            enable_text_coloring,
            verbosity,
            message_format,
        }
    }

    fn with_color(&self, color: Color, s: &str) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetForegroundColor(color), s, ResetAttributes)
        } else {
            String::from(s)
        }
    }

    fn green(&self, s: &str) -> String {
        self.with_color(Color::DarkGreen, s)
    }

    fn yellow(&self, s: &str) -> String {
        self.with_color(Color::DarkYellow, s)
    }

    fn bold(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Bold), s, ResetAttributes)
        } else {
            s
        }
    }

    fn faint(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Faint), s, ResetAttributes)
        } else {
            s
        }
    }

    /// Sentence telling whether the reference value falls inside the interval
    pub fn verdict(&self, outcome: &Outcome, reference_label: &str, unit: &str) -> String {
        let reference = format::with_unit(&format::trimmed(outcome.reference_value, 4), unit);

        if outcome.within_interval {
            self.green(&format!(
                "The {} of {} falls within the confidence interval.",
                reference_label, reference
            ))
        } else {
            self.yellow(&format!(
                "The {} of {} does NOT fall within the confidence interval.",
                reference_label, reference
            ))
        }
    }

    /// Renders the whole report as it would be printed
    pub fn render(&self, outcome: &Outcome, reference_label: &str, unit: &str) -> Result<String> {
        if self.message_format == MessageFormat::Json {
            return self.render_json(outcome, unit);
        }

        let verdict = self.verdict(outcome, reference_label, unit);
        if self.verbosity == CliVerbosity::Quiet {
            return Ok(verdict);
        }

        let summary = &outcome.summary;
        let ci = &summary.confidence_interval;
        let mut lines = vec![self.bold(outcome.column.name.clone())];

        lines.push(format!(
            "  sample mean: {}",
            format::with_unit(&format::fixed(summary.mean), unit)
        ));
        lines.push(format!(
            "  {} confidence interval: {}",
            format::level(ci.confidence_level),
            format::with_unit(
                &format!(
                    "({}, {})",
                    format::fixed(ci.lower_bound),
                    format::fixed(ci.upper_bound)
                ),
                unit
            )
        ));

        if self.verbosity == CliVerbosity::Verbose {
            lines.push(self.faint(format!(
                "  observations: {} ({} of {} rows discarded)",
                summary.sample_size,
                outcome.column.discarded(),
                outcome.column.rows
            )));
            lines.push(self.faint(format!(
                "  std dev: {}  std err: {}",
                format::short(summary.std_dev),
                format::short(summary.std_err())
            )));
            lines.push(self.faint(format!(
                "  t critical (df = {}): {}  margin of error: {}",
                summary.degrees_of_freedom(),
                format::short(summary.t_critical),
                format::short(summary.margin_of_error())
            )));
            if let Some(chart) = &outcome.chart {
                lines.push(self.faint(format!("  chart: {}", chart.display())));
            }
        }

        lines.push(format!(
            "  {}: {}",
            reference_label,
            format::with_unit(&format::trimmed(outcome.reference_value, 4), unit)
        ));
        lines.push(format!("  {}", verdict));

        Ok(lines.join("\n"))
    }

    fn render_json(&self, outcome: &Outcome, unit: &str) -> Result<String> {
        let message = JsonMessage {
            reason: "confidence-interval",
            column: &outcome.column.name,
            rows: outcome.column.rows,
            discarded: outcome.column.discarded(),
            unit,
            summary: &outcome.summary,
            margin_of_error: outcome.summary.margin_of_error(),
            reference_value: outcome.reference_value,
            within_interval: outcome.within_interval,
            chart: outcome.chart.as_deref(),
        };

        Ok(serde_json::to_string(&message)?)
    }

    /// Prints the report to stdout
    pub fn print(&self, outcome: &Outcome, reference_label: &str, unit: &str) -> Result<()> {
        println!("{}", self.render(outcome, reference_label, unit)?);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use serde_json::Value;

    use super::{CliReport, CliVerbosity, MessageFormat};
    use crate::analysis::Outcome;
    use crate::csv_input::Column;
    use crate::estimate::compute_summary;

    fn outcome(values: Vec<f64>, rows: usize, reference_value: f64) -> Outcome {
        let summary = compute_summary(&values, 0.9).unwrap();

        Outcome {
            within_interval: summary.confidence_interval.contains(reference_value),
            column: Column {
                name: String::from("study_hours"),
                values,
                rows,
            },
            summary,
            reference_value,
            chart: None,
        }
    }

    fn plain(verbosity: CliVerbosity) -> CliReport {
        CliReport::new(false, verbosity, MessageFormat::Text)
    }

    #[test]
    fn normal_report() {
        let outcome = outcome(vec![1., 2., 3., 4., 5.], 5, 2.);
        let text = plain(CliVerbosity::Normal)
            .render(&outcome, "recommended study time", "hours")
            .unwrap();

        assert!(text.starts_with("study_hours\n"));
        assert!(text.contains("sample mean: 3.00 hours"));
        assert!(text.contains("90% confidence interval: (1.49, 4.51) hours"));
        assert!(text.contains("recommended study time: 2 hours"));
        assert!(text.ends_with(
            "The recommended study time of 2 hours falls within the confidence interval."
        ));
        assert!(!text.contains("std dev"));
    }

    #[test]
    fn quiet_report_is_the_verdict() {
        let outcome = outcome(vec![5., 6., 7.], 4, 2.);
        let text = plain(CliVerbosity::Quiet)
            .render(&outcome, "reference value", "hours")
            .unwrap();

        assert_eq!(
            text,
            "The reference value of 2 hours does NOT fall within the confidence interval."
        );
    }

    #[test]
    fn verbose_report() {
        let outcome = outcome(vec![1., 2., 3., 4., 5.], 7, 2.);
        let text = plain(CliVerbosity::Verbose)
            .render(&outcome, "reference value", "")
            .unwrap();

        assert!(text.contains("observations: 5 (2 of 7 rows discarded)"));
        assert!(text.contains("std dev: 1.5811"));
        assert!(text.contains("t critical (df = 4): 2.1318"));
        assert!(text.contains("margin of error: 1.5074"));
    }

    #[test]
    fn colored_verdict() {
        let inside = outcome(vec![1., 2., 3.], 3, 2.);
        let outside = outcome(vec![1., 2., 3.], 3, 20.);
        let report = CliReport::new(true, CliVerbosity::Quiet, MessageFormat::Text);

        let green = report.verdict(&inside, "reference value", "");
        let yellow = report.verdict(&outside, "reference value", "");

        assert!(green.starts_with('\u{1b}'));
        assert!(green.contains("falls within"));
        assert!(yellow.starts_with('\u{1b}'));
        assert!(yellow.contains("does NOT fall within"));
        assert_ne!(green[..8], yellow[..8]);
    }

    #[test]
    fn json_message() {
        let outcome = outcome(vec![2., 2., 2.], 3, 2.);
        let report = CliReport::new(true, CliVerbosity::Verbose, MessageFormat::Json);
        let json: Value =
            serde_json::from_str(&report.render(&outcome, "reference value", "hours").unwrap())
                .unwrap();

        assert_eq!(json["reason"], "confidence-interval");
        assert_eq!(json["column"], "study_hours");
        assert_eq!(json["rows"], 3);
        assert_eq!(json["discarded"], 0);
        assert_eq!(json["summary"]["mean"], 2.);
        assert_eq!(json["summary"]["std_dev"], 0.);
        assert_eq!(json["summary"]["sample_size"], 3);
        assert_eq!(json["summary"]["confidence_interval"]["confidence_level"], 0.9);
        assert_eq!(json["summary"]["confidence_interval"]["lower_bound"], 2.);
        assert_eq!(json["summary"]["confidence_interval"]["upper_bound"], 2.);
        assert_eq!(json["within_interval"], true);
        assert!(json["chart"].is_null());
    }
}
