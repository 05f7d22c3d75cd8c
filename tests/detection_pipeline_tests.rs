//! End-to-end tests: JUnit reports -> aggregate -> detect -> sort

use flakeguard::detect::sort_by_probability;
use flakeguard::outcome::{Outcome, TestIdentity};
use flakeguard::{aggregate, beta_flaky, classify, detect, junit};
use std::path::Path;

fn fixture_runs() -> Vec<Vec<Outcome>> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/junit");
    ["run1.xml", "run2.xml", "run3.xml"]
        .iter()
        .map(|name| junit::parse_file(dir.join(name)).unwrap())
        .collect()
}

#[test]
fn test_fixture_reports_parse() {
    let runs = fixture_runs();
    assert_eq!(runs.len(), 3);
    assert!(runs.iter().all(|run| run.len() == 3));
    assert!(runs[0][1].is_failed());
    assert!(!runs[0][2].is_failed());
}

#[test]
fn test_end_to_end_scenario() {
    let records = aggregate(&fixture_runs());
    assert_eq!(records.len(), 3);

    let mut flaky = detect(&records, 0.008, 0.5);
    sort_by_probability(&mut flaky);

    let tags: Vec<_> = flaky.iter().map(|e| e.root_cause.as_str()).collect();
    assert_eq!(tags, vec!["timing-dependency", "race-condition"]);

    let identities: Vec<_> = flaky.iter().map(|e| e.identity()).collect();
    assert_eq!(
        identities,
        vec![
            TestIdentity::new("auth", "test_token"),
            TestIdentity::new("core", "test_calc"),
        ]
    );

    for pair in flaky.windows(2) {
        assert!(pair[0].flaky_prob >= pair[1].flaky_prob);
    }
}

#[test]
fn test_aggregated_failure_snippets() {
    let records = aggregate(&fixture_runs());
    let token = &records[&TestIdentity::new("auth", "test_token")];
    assert_eq!(
        token.failure_texts,
        vec![
            "timeout waiting connection timed out",
            "deadline exceeded timeout",
        ]
    );
}

#[test]
fn test_reported_values_respect_precision() {
    let records = aggregate(&fixture_runs());
    for entry in detect(&records, 0.008, 0.0) {
        for (value, decimals) in [
            (entry.pass_rate, 3),
            (entry.flaky_prob, 3),
            (entry.avg_duration, 2),
            (entry.ci_cost, 2),
        ] {
            let scaled = value * 10f64.powi(decimals);
            assert!(
                (scaled - scaled.round()).abs() < 1e-6,
                "{} has more than {} decimals",
                value,
                decimals
            );
        }
    }
}

#[test]
fn test_documented_estimator_properties() {
    assert!(beta_flaky(5, 5) > beta_flaky(10, 0));
    assert!(beta_flaky(5, 5) > 0.9);
    assert!(beta_flaky(1, 2) >= 0.5);
}

#[test]
fn test_documented_classifier_properties() {
    assert_eq!(
        classify(&["race detected", "concurrent map writes"]).tag,
        "race-condition"
    );
    assert_eq!(
        classify(&["timeout waiting", "deadline exceeded"]).tag,
        "timing-dependency"
    );
    let unknown = classify(&["random unknown error"]);
    assert_eq!(unknown.tag, "unknown");
    assert!(!unknown.suggestion.is_empty());
}
