//! Detection configuration and flakeguard.toml loading
//!
//! The detection engine takes its cost rate and threshold as plain
//! arguments. Defaults live here, and the CLI applies them with the
//! precedence: command-line flag > config file > built-in default.
//!
//! # Example flakeguard.toml
//!
//! ```toml
//! cost_per_minute = 0.016
//! threshold = 0.7
//! results = "target/junit/*.xml"
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fewest runs for which flakiness statistics are meaningful
pub const MIN_RUNS: usize = 2;

/// Configuration for flaky-test detection
///
/// # Example
/// ```
/// use flakeguard::config::DetectionConfig;
///
/// let config = DetectionConfig::default();
/// assert_eq!(config.threshold, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectionConfig {
    /// CI compute cost in currency units per minute
    pub cost_per_minute: f64,

    /// Minimum flakiness probability for a test to be reported, in [0, 1]
    pub threshold: f64,

    /// Glob pattern for JUnit XML result files
    pub results: String,

    /// Minimum number of parsed runs before detection is attempted
    pub min_runs: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            cost_per_minute: 0.008,
            threshold: 0.5,
            results: "*.xml".to_string(),
            min_runs: MIN_RUNS,
        }
    }
}

impl DetectionConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Load configuration from a TOML string; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            bail!("threshold must be in [0, 1], got {}", self.threshold);
        }

        if !self.cost_per_minute.is_finite() || self.cost_per_minute < 0.0 {
            bail!(
                "cost_per_minute must be a non-negative number, got {}",
                self.cost_per_minute
            );
        }

        if self.min_runs < MIN_RUNS {
            bail!(
                "min_runs must be >= {} for statistical detection, got {}",
                MIN_RUNS,
                self.min_runs
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DetectionConfig::default();
        assert_eq!(config.cost_per_minute, 0.008);
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.results, "*.xml");
        assert_eq!(config.min_runs, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = DetectionConfig::from_toml_str("threshold = 0.8").unwrap();
        assert_eq!(config.threshold, 0.8);
        assert_eq!(config.cost_per_minute, 0.008);
        assert_eq!(config.results, "*.xml");
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            cost_per_minute = 0.016
            threshold = 0.7
            results = "reports/*.xml"
            min_runs = 5
        "#;
        let config = DetectionConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.cost_per_minute, 0.016);
        assert_eq!(config.results, "reports/*.xml");
        assert_eq!(config.min_runs, 5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(DetectionConfig::from_toml_str("treshold = 0.5").is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_threshold() {
        let mut config = DetectionConfig::default();
        config.threshold = 1.5;
        assert!(config.validate().is_err());
        config.threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_cost() {
        let mut config = DetectionConfig::default();
        config.cost_per_minute = -0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_min_runs() {
        let mut config = DetectionConfig::default();
        config.min_runs = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flakeguard.toml");
        fs::write(&path, "cost_per_minute = 0.1\n").unwrap();
        let config = DetectionConfig::from_file(&path).unwrap();
        assert_eq!(config.cost_per_minute, 0.1);
    }

    #[test]
    fn test_from_missing_file() {
        assert!(DetectionConfig::from_file("/nonexistent/flakeguard.toml").is_err());
    }
}
