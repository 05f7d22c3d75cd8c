//! Flakiness probability from pass/fail counts
//!
//! The true pass rate of a test is modelled as a Beta(pass + 1, fail + 1)
//! posterior (uniform prior). A test is "flaky" to the degree that the
//! posterior mass sits strictly inside (0.05, 0.95): neither reliably
//! passing nor reliably broken.
//!
//! The Beta distribution is approximated by a normal distribution with
//! matching mean and variance, so only the error function is required
//! (`libm::erf`).

/// Lower bound of the "genuinely uncertain" pass-rate band
pub const LOWER_PASS_RATE: f64 = 0.05;

/// Upper bound of the "genuinely uncertain" pass-rate band
pub const UPPER_PASS_RATE: f64 = 0.95;

/// Posterior standard deviations below this are treated as degenerate
pub const MIN_STDDEV: f64 = 1e-10;

/// Probability that a test with the given counts is flaky, in `[0, 1]`
///
/// Returns 0 when there is too little evidence (`pass + fail < 2`), when
/// the test never failed, when it never passed, or when the posterior
/// standard deviation is numerically degenerate.
///
/// # Example
/// ```
/// use flakeguard::estimator::beta_flaky;
///
/// assert_eq!(beta_flaky(10, 0), 0.0);
/// assert!(beta_flaky(5, 5) > 0.9);
/// ```
pub fn beta_flaky(pass: u32, fail: u32) -> f64 {
    if u64::from(pass) + u64::from(fail) < 2 || fail == 0 || pass == 0 {
        return 0.0;
    }

    let a = f64::from(pass) + 1.0;
    let b = f64::from(fail) + 1.0;
    let sum = a + b;

    let mean = a / sum;
    let stddev = (a * b / (sum * sum * (sum + 1.0))).sqrt();
    if stddev < MIN_STDDEV {
        return 0.0;
    }

    let upper = normal_cdf((UPPER_PASS_RATE - mean) / stddev);
    let lower = normal_cdf((LOWER_PASS_RATE - mean) / stddev);

    (upper - lower).clamp(0.0, 1.0)
}

/// Standard normal CDF: Φ(x) = 0.5 · (1 + erf(x / √2))
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}
