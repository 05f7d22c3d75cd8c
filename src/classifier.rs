//! Root-cause classification of flaky test failures
//!
//! Failure texts are concatenated, lower-cased and matched against an
//! ordered rule table. The first rule with any keyword present as a
//! substring wins. Matching is not word-boundary aware ("stateful"
//! matches the `state` keyword).
//!
//! The result is a triage hint, not a diagnosis.

use serde::Serialize;

/// Tag reported when no rule matches
pub const UNKNOWN_TAG: &str = "unknown";

/// Suggestion reported when no rule matches
pub const UNKNOWN_SUGGESTION: &str = "Run tests in random order; check for hidden shared state";

/// One entry of the root-cause rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RootCauseRule {
    /// Root-cause tag (e.g. "race-condition")
    pub tag: &'static str,
    /// Lower-case keywords; any one present selects this rule
    pub keywords: &'static [&'static str],
    /// Remediation hint for this cause
    pub suggestion: &'static str,
}

impl RootCauseRule {
    /// Check whether any keyword occurs in already lower-cased text
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// Built-in rule table, in evaluation order
pub const DEFAULT_RULES: &[RootCauseRule] = &[
    RootCauseRule {
        tag: "race-condition",
        keywords: &["race", "concurrent", "mutex", "lock", "deadlock", "thread"],
        suggestion: "Add synchronization; isolate shared state per test",
    },
    RootCauseRule {
        tag: "timing-dependency",
        keywords: &["timeout", "deadline", "sleep", "elapsed", "timed out"],
        suggestion: "Replace sleeps with polling/retry; shorten timeouts",
    },
    RootCauseRule {
        tag: "timezone",
        keywords: &["timezone", "utc", "datetime", "date_format", "localtime"],
        suggestion: "Pin TZ=UTC; use time-freezing libraries",
    },
    RootCauseRule {
        tag: "network",
        keywords: &[
            "connection",
            "network",
            "econnrefused",
            "dns",
            "socket",
            "refused",
        ],
        suggestion: "Mock external calls; use a test HTTP double",
    },
    RootCauseRule {
        tag: "floating-point",
        keywords: &["precision", "float", "decimal", "epsilon", "almost"],
        suggestion: "Use approximate assertions with epsilon tolerance",
    },
    RootCauseRule {
        tag: "test-ordering",
        keywords: &["order", "sequence", "setup", "teardown", "depends"],
        suggestion: "Ensure independent setup/teardown per test",
    },
    RootCauseRule {
        tag: "shared-state",
        keywords: &["state", "cache", "global", "singleton", "pollution"],
        suggestion: "Reset shared state in setUp; use fresh fixtures",
    },
];

/// Result of classifying a test's failure texts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tag: &'static str,
    pub suggestion: &'static str,
}

impl Classification {
    pub fn unknown() -> Self {
        Self {
            tag: UNKNOWN_TAG,
            suggestion: UNKNOWN_SUGGESTION,
        }
    }
}

/// Classify failure texts with the built-in rule table
///
/// # Example
/// ```
/// use flakeguard::classifier::classify;
///
/// let c = classify(&["race detected", "concurrent map writes"]);
/// assert_eq!(c.tag, "race-condition");
/// ```
pub fn classify<S: AsRef<str>>(failure_texts: &[S]) -> Classification {
    classify_with(DEFAULT_RULES, failure_texts)
}

/// Classify failure texts against an explicit, ordered rule table
///
/// An empty input, or text matching no rule, yields [`Classification::unknown`].
pub fn classify_with<S: AsRef<str>>(
    rules: &[RootCauseRule],
    failure_texts: &[S],
) -> Classification {
    let text = failure_texts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    rules
        .iter()
        .find(|rule| rule.matches(&text))
        .map(|rule| Classification {
            tag: rule.tag,
            suggestion: rule.suggestion,
        })
        .unwrap_or_else(Classification::unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_condition() {
        let c = classify(&["race detected", "concurrent map writes"]);
        assert_eq!(c.tag, "race-condition");
        assert_eq!(c.suggestion, "Add synchronization; isolate shared state per test");
    }

    #[test]
    fn test_timing_dependency() {
        let c = classify(&["timeout waiting", "deadline exceeded"]);
        assert_eq!(c.tag, "timing-dependency");
    }

    #[test]
    fn test_network() {
        assert_eq!(classify(&["connection refused"]).tag, "network");
    }

    #[test]
    fn test_timezone() {
        assert_eq!(classify(&["timezone UTC mismatch"]).tag, "timezone");
    }

    #[test]
    fn test_floating_point() {
        assert_eq!(classify(&["float precision loss"]).tag, "floating-point");
    }

    #[test]
    fn test_ordering_and_shared_state() {
        assert_eq!(classify(&["teardown not run"]).tag, "test-ordering");
        assert_eq!(classify(&["stale cache entry"]).tag, "shared-state");
    }

    #[test]
    fn test_unknown() {
        let c = classify(&["random unknown error"]);
        assert_eq!(c.tag, UNKNOWN_TAG);
        assert!(!c.suggestion.is_empty());
    }

    #[test]
    fn test_empty_input_is_unknown() {
        let empty: [&str; 0] = [];
        assert_eq!(classify(&empty), Classification::unknown());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify(&["DEADLOCK in worker"]).tag, "race-condition");
    }

    #[test]
    fn test_first_rule_wins() {
        // "timeout" (timing) and "lock" (race) both present; race is earlier
        let c = classify(&["timeout acquiring lock"]);
        assert_eq!(c.tag, "race-condition");
    }

    #[test]
    fn test_substring_match_is_not_word_bounded() {
        assert_eq!(classify(&["stateful widget broke"]).tag, "shared-state");
        // "clock" contains "lock"
        assert_eq!(classify(&["clock skew"]).tag, "race-condition");
    }

    #[test]
    fn test_keyword_spanning_texts() {
        // Texts are joined with a space, so "timed" + "out" forms "timed out"
        assert_eq!(classify(&["timed", "out"]).tag, "timing-dependency");
    }

    #[test]
    fn test_custom_rule_table() {
        let rules = [RootCauseRule {
            tag: "oom",
            keywords: &["out of memory"],
            suggestion: "Reduce fixture size",
        }];
        assert_eq!(classify_with(&rules, &["Out Of Memory"]).tag, "oom");
        assert_eq!(classify_with(&rules, &["race"]).tag, UNKNOWN_TAG);
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let tags: Vec<_> = DEFAULT_RULES.iter().map(|r| r.tag).collect();
        assert_eq!(
            tags,
            vec![
                "race-condition",
                "timing-dependency",
                "timezone",
                "network",
                "floating-point",
                "test-ordering",
                "shared-state",
            ]
        );
    }
}
