//! Normalized per-test outcomes consumed by the aggregator
//!
//! Any report producer (JUnit XML, JSON, TAP, ...) feeds the detection
//! engine through this shape. See [`crate::junit`] for the bundled parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a test across runs: the (class, name) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestIdentity {
    /// Grouping/class identifier (e.g. JUnit `classname`)
    pub class: String,
    /// Test name
    pub name: String,
}

impl TestIdentity {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class, self.name)
    }
}

/// Failure details attached to a failing outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Short failure message (JUnit `message` attribute)
    pub message: String,
    /// Failure body text (stack trace, assertion output)
    pub body: String,
}

impl Failure {
    pub fn new(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            body: body.into(),
        }
    }

    /// Snippet recorded by the aggregator: message, a single space, body
    pub fn snippet(&self) -> String {
        format!("{} {}", self.message, self.body)
    }
}

/// One test execution within one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub identity: TestIdentity,
    /// Duration in seconds (>= 0)
    pub duration_s: f64,
    /// Present when the execution failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl Outcome {
    /// A passing execution
    pub fn passed(class: impl Into<String>, name: impl Into<String>, duration_s: f64) -> Self {
        Self {
            identity: TestIdentity::new(class, name),
            duration_s,
            failure: None,
        }
    }

    /// A failing execution with message and body text
    pub fn failed(
        class: impl Into<String>,
        name: impl Into<String>,
        duration_s: f64,
        message: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            identity: TestIdentity::new(class, name),
            duration_s,
            failure: Some(Failure::new(message, body)),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// All outcomes of one complete suite execution
pub type Run = Vec<Outcome>;
