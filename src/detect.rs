//! Detection pipeline: probability filter, derived metrics, classification
//!
//! Turns aggregated [`Records`] into [`FlakinessReport`] entries. Only
//! records whose flakiness probability reaches the threshold are reported.
//! Output order is unspecified; use [`sort_by_probability`] before
//! presenting results.

use crate::aggregate::{Records, TestRecord};
use crate::classifier::classify;
use crate::estimator::beta_flaky;
use crate::outcome::TestIdentity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// One flagged flaky test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlakinessReport {
    pub name: String,
    pub class: String,
    /// pass / (pass + fail), 3 decimal places
    pub pass_rate: f64,
    /// Posterior flakiness probability, 3 decimal places
    #[serde(rename = "flaky_probability")]
    pub flaky_prob: f64,
    pub root_cause: String,
    pub total_runs: u32,
    /// Mean duration in seconds, 2 decimal places
    #[serde(rename = "avg_duration_s")]
    pub avg_duration: f64,
    /// CI minutes wasted by failing executions, in currency units, 2 decimal places
    #[serde(rename = "ci_cost_usd")]
    pub ci_cost: f64,
    #[serde(rename = "fix_suggestion")]
    pub suggestion: String,
}

impl FlakinessReport {
    pub fn identity(&self) -> TestIdentity {
        TestIdentity::new(self.class.clone(), self.name.clone())
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Build the report entry for one record, or `None` below the threshold
pub fn evaluate(
    identity: &TestIdentity,
    record: &TestRecord,
    cost_per_minute: f64,
    threshold: f64,
) -> Option<FlakinessReport> {
    let prob = beta_flaky(record.pass, record.fail);
    if prob < threshold {
        return None;
    }

    let n = record.runs();
    if n == 0 {
        return None;
    }
    let cause = classify(&record.failure_texts);
    let avg = record.total_duration_s / f64::from(n);
    let cost = f64::from(record.fail) * avg / 60.0 * cost_per_minute;

    Some(FlakinessReport {
        name: identity.name.clone(),
        class: identity.class.clone(),
        pass_rate: round_to(f64::from(record.pass) / f64::from(n), 3),
        flaky_prob: round_to(prob, 3),
        root_cause: cause.tag.to_string(),
        total_runs: n,
        avg_duration: round_to(avg, 2),
        ci_cost: round_to(cost, 2),
        suggestion: cause.suggestion.to_string(),
    })
}

/// Flag flaky tests among aggregated records
///
/// `cost_per_minute` and `threshold` are taken as given; defaulting is the
/// caller's job (see [`crate::config::DetectionConfig`]). The caller must
/// also have supplied at least [`crate::config::MIN_RUNS`] runs for the
/// statistics to mean anything; this function does not check.
pub fn detect(records: &Records, cost_per_minute: f64, threshold: f64) -> Vec<FlakinessReport> {
    let flagged: Vec<FlakinessReport> = records
        .iter()
        .filter_map(|(identity, record)| evaluate(identity, record, cost_per_minute, threshold))
        .collect();

    debug!(
        tests = records.len(),
        flaky = flagged.len(),
        threshold,
        "detection complete"
    );
    flagged
}

/// Sort entries by descending flakiness probability
///
/// Ties fall back to ascending (class, name) so the order is reproducible.
pub fn sort_by_probability(entries: &mut [FlakinessReport]) {
    entries.sort_by(|a, b| {
        b.flaky_prob
            .partial_cmp(&a.flaky_prob)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.class.cmp(&b.class))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Sum of the estimated CI cost over all entries
pub fn total_cost(entries: &[FlakinessReport]) -> f64 {
    entries.iter().map(|e| e.ci_cost).sum()
}
