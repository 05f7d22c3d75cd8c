//! JSON output format for flaky-test reports

use crate::detect::FlakinessReport;
use serde::{Deserialize, Serialize};

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Flagged tests, most flaky first
    pub flaky_tests: Vec<FlakinessReport>,
    /// Number of result files that were parsed
    pub total_runs: usize,
    /// Number of distinct tests seen across all runs
    pub total_tests: usize,
    /// Number of flagged tests
    pub flaky_count: usize,
}

impl JsonReport {
    pub fn new(flaky_tests: Vec<FlakinessReport>, total_runs: usize, total_tests: usize) -> Self {
        Self {
            flaky_count: flaky_tests.len(),
            flaky_tests,
            total_runs,
            total_tests,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> FlakinessReport {
        FlakinessReport {
            name: "test_token".to_string(),
            class: "auth".to_string(),
            pass_rate: 0.333,
            flaky_prob: 0.957,
            root_cause: "timing-dependency".to_string(),
            total_runs: 3,
            avg_duration: 1.0,
            ci_cost: 0.0,
            suggestion: "Replace sleeps with polling/retry; shorten timeouts".to_string(),
        }
    }

    #[test]
    fn test_json_report_counts() {
        let report = JsonReport::new(vec![entry()], 3, 3);
        assert_eq!(report.flaky_count, 1);
        assert_eq!(report.total_runs, 3);
    }

    #[test]
    fn test_json_serialization() {
        let json = JsonReport::new(vec![entry()], 3, 3).to_json().unwrap();
        assert!(json.contains("\"flaky_tests\""));
        assert!(json.contains("\"flaky_count\": 1"));
        assert!(json.contains("\"flaky_probability\": 0.957"));
        assert!(json.contains("\"root_cause\": \"timing-dependency\""));
    }

    #[test]
    fn test_empty_report_round_trips() {
        let json = JsonReport::new(Vec::new(), 2, 10).to_json().unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert!(parsed.flaky_tests.is_empty());
        assert_eq!(parsed.total_tests, 10);
    }
}
