//! FlakeGuard - statistical flaky-test detection
//!
//! This library ingests several independent runs of the same test suite,
//! estimates for every test the probability that its outcome is
//! non-deterministic, attributes a probable root cause from failure text,
//! and estimates the CI cost of the flakiness.
//!
//! The detection core is four pure operations:
//! [`aggregate`], [`beta_flaky`], [`classify`] and [`detect`].
//!
//! ```
//! use flakeguard::outcome::Outcome;
//! use flakeguard::{aggregate, detect};
//!
//! let runs = vec![
//!     vec![Outcome::failed("core", "test_calc", 0.1, "race detected", "")],
//!     vec![Outcome::passed("core", "test_calc", 0.1)],
//!     vec![Outcome::passed("core", "test_calc", 0.1)],
//! ];
//! let flaky = detect(&aggregate(&runs), 0.008, 0.5);
//! assert_eq!(flaky[0].root_cause, "race-condition");
//! ```

pub mod aggregate;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod detect;
pub mod estimator;
pub mod filter;
pub mod json_output;
pub mod junit;
pub mod outcome;
pub mod text_output;

pub use aggregate::{aggregate, Records, TestRecord};
pub use classifier::{classify, classify_with, Classification};
pub use detect::{detect, FlakinessReport};
pub use estimator::beta_flaky;
