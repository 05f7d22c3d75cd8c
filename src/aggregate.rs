//! Outcome aggregation across runs
//!
//! Folds N independent runs into one [`TestRecord`] per test identity.
//! Tests that appear in only some runs are tolerated; an identity absent
//! from a run simply contributes nothing for that run.

use crate::outcome::{Outcome, TestIdentity};
use std::collections::HashMap;
use tracing::debug;

/// Pass/fail history of a single test across all runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestRecord {
    /// Number of passing executions
    pub pass: u32,
    /// Number of failing executions
    pub fail: u32,
    /// Sum of all observed durations (seconds)
    pub total_duration_s: f64,
    /// One snippet per failing execution, in run order
    pub failure_texts: Vec<String>,
}

impl TestRecord {
    /// Total number of executions observed (pass + fail)
    pub fn runs(&self) -> u32 {
        self.pass + self.fail
    }

    /// Fold one outcome into this record
    pub fn record(&mut self, outcome: &Outcome) {
        match &outcome.failure {
            Some(failure) => {
                self.fail += 1;
                self.failure_texts.push(failure.snippet());
            }
            None => self.pass += 1,
        }
        self.total_duration_s += outcome.duration_s;
    }
}

/// Aggregated records keyed by test identity
///
/// Iteration order is unspecified; consumers must sort explicitly.
pub type Records = HashMap<TestIdentity, TestRecord>;

/// Aggregate a sequence of runs into per-test records
///
/// Zero runs yield an empty mapping.
///
/// # Example
/// ```
/// use flakeguard::aggregate::aggregate;
/// use flakeguard::outcome::{Outcome, TestIdentity};
///
/// let runs = vec![
///     vec![Outcome::passed("auth", "test_login", 0.5)],
///     vec![Outcome::failed("auth", "test_login", 0.4, "timeout", "")],
/// ];
/// let records = aggregate(&runs);
/// let login = &records[&TestIdentity::new("auth", "test_login")];
/// assert_eq!((login.pass, login.fail), (1, 1));
/// ```
pub fn aggregate<R: AsRef<[Outcome]>>(runs: &[R]) -> Records {
    let mut records = Records::new();

    for run in runs {
        for outcome in run.as_ref() {
            records
                .entry(outcome.identity.clone())
                .or_default()
                .record(outcome);
        }
    }

    debug!(runs = runs.len(), tests = records.len(), "aggregated runs");
    records
}
