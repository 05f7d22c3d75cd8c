//! CSV output format for flaky-test reports

use crate::detect::FlakinessReport;

const HEADER: &[&str] = &[
    "class",
    "name",
    "pass_rate",
    "flaky_probability",
    "root_cause",
    "total_runs",
    "avg_duration_s",
    "ci_cost_usd",
    "fix_suggestion",
];

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvReport {
    entries: Vec<FlakinessReport>,
}

impl CsvReport {
    pub fn new(entries: Vec<FlakinessReport>) -> Self {
        Self { entries }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_entry(entry: &FlakinessReport) -> String {
        [
            Self::escape_field(&entry.class),
            Self::escape_field(&entry.name),
            format!("{:.3}", entry.pass_rate),
            format!("{:.3}", entry.flaky_prob),
            Self::escape_field(&entry.root_cause),
            entry.total_runs.to_string(),
            format!("{:.2}", entry.avg_duration),
            format!("{:.2}", entry.ci_cost),
            Self::escape_field(&entry.suggestion),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = HEADER.join(",");
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&Self::format_entry(entry));
            output.push('\n');
        }

        output
    }
}
