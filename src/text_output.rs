//! Human-readable text report

use crate::detect::{total_cost, FlakinessReport};

/// Render the text report for sorted entries
pub fn render(entries: &[FlakinessReport], total_runs: usize, total_tests: usize) -> String {
    let mut out = format!(
        "FlakeGuard — {} runs, {} tests, {} flaky\n\n",
        total_runs,
        total_tests,
        entries.len()
    );

    if entries.is_empty() {
        out.push_str("  No flaky tests detected.\n");
        return out;
    }

    for entry in entries {
        out.push_str(&format!("  {}::{}\n", entry.class, entry.name));
        out.push_str(&format!(
            "   pass={:.0}% flaky={:.0}% runs={} cause={} cost=${:.2}\n",
            entry.pass_rate * 100.0,
            entry.flaky_prob * 100.0,
            entry.total_runs,
            entry.root_cause,
            entry.ci_cost
        ));
        out.push_str(&format!("   -> {}\n\n", entry.suggestion));
    }

    out.push_str(&format!("  Total CI waste: ${:.2}\n", total_cost(entries)));
    out
}
