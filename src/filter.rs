//! Test selection for -e expressions
//!
//! Supports:
//! - Class lists: -e class=auth,core
//! - Regex over `class::name`: -e name=/^auth::test_/
//! - Negation of either form: -e '!class=legacy'

use crate::outcome::{Outcome, TestIdentity};
use anyhow::{bail, Context, Result};
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Selector {
    Classes(HashSet<String>),
    Pattern(Regex),
}

/// Filter that determines which tests take part in detection
#[derive(Debug, Clone)]
pub struct TestFilter {
    /// None = all tests
    selector: Option<Selector>,
    negated: bool,
}

impl TestFilter {
    /// Create a filter that includes all tests
    pub fn all() -> Self {
        Self {
            selector: None,
            negated: false,
        }
    }

    /// Parse a selection expression like "class=auth,core" or "name=/token/"
    pub fn from_expr(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        let (negated, expr) = match expr.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, expr),
        };

        let selector = if let Some(spec) = expr.strip_prefix("class=") {
            Selector::Classes(
                spec.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else if let Some(spec) = expr.strip_prefix("name=") {
            Selector::Pattern(Self::parse_pattern(spec)?)
        } else {
            bail!(
                "Invalid filter expression: {}. Expected class=A,B or name=/REGEX/",
                expr
            );
        };

        Ok(Self {
            selector: Some(selector),
            negated,
        })
    }

    fn parse_pattern(spec: &str) -> Result<Regex> {
        let Some(pattern) = spec
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        else {
            bail!("Regex must be delimited by slashes: name=/PATTERN/, got {}", spec);
        };
        Regex::new(pattern).with_context(|| format!("Invalid regex pattern: {}", pattern))
    }

    /// Check if a test takes part in detection
    pub fn should_include(&self, identity: &TestIdentity) -> bool {
        let matched = match &self.selector {
            None => return true, // No filter = include all
            Some(Selector::Classes(classes)) => classes.contains(&identity.class),
            Some(Selector::Pattern(re)) => re.is_match(&identity.to_string()),
        };
        matched != self.negated
    }

    /// Drop unselected outcomes from a run
    pub fn filter_run(&self, run: Vec<Outcome>) -> Vec<Outcome> {
        if self.selector.is_none() {
            return run;
        }
        run.into_iter()
            .filter(|outcome| self.should_include(&outcome.identity))
            .collect()
    }
}

impl Default for TestFilter {
    fn default() -> Self {
        Self::all()
    }
}
