//! Binomial distribution of "successes"
//!
//! The probability mass function is evaluated in log space,
//! `ln C(n, x) + x ln p + (n - x) ln(1 - p)`, with the binomial coefficient taken from
//! the [Lanczos approximation](https://en.wikipedia.org/wiki/Lanczos_approximation) of ln Γ.
//! This keeps the evaluation finite for thousands of trials where the factorials
//! themselves would overflow an `f64`.
//!
//! # Usage:
//! ```
//! use tailrisk::binomial::BinomialParameters;
//!
//! let coin = BinomialParameters::new(10, 0.5).unwrap();
//! assert!((coin.pmf(3) - 120.0 / 1024.0).abs() < 1e-12);
//! assert_eq!(coin.mean(), 5.0);
//! ```

use std::f64::consts::PI;

use crate::error::RiskError;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// A Binomial(trials, success_probability) distribution
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BinomialParameters {
    trials: u64,
    success_probability: f64,
}

impl BinomialParameters {
    pub fn new(trials: u64, success_probability: f64) -> Result<Self, RiskError> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&success_probability) {
            return Err(RiskError::InvalidProbability(success_probability));
        }
        Ok(Self {
            trials,
            success_probability,
        })
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    /// μ = trials × success_probability, the centre of the loss variable
    pub fn mean(&self) -> f64 {
        self.trials as f64 * self.success_probability
    }

    /// Probability of exactly `x` successes, zero outside the support
    pub fn pmf(&self, x: u64) -> f64 {
        let n = self.trials;
        let p = self.success_probability;
        if x > n {
            return 0.0;
        }
        // degenerate distributions put all their mass on one end, exactly
        if p == 0.0 {
            return if x == 0 { 1.0 } else { 0.0 };
        }
        if p == 1.0 {
            return if x == n { 1.0 } else { 0.0 };
        }
        let (n, x) = (n as f64, x as f64);
        let ln_mass = ln_choose(n, x) + x * p.ln() + (n - x) * (-p).ln_1p();
        ln_mass.exp()
    }
}

/// ln C(n, k) for 0 <= k <= n
fn ln_choose(n: f64, k: f64) -> f64 {
    if k == 0.0 || k == n {
        return 0.0;
    }
    ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0)
}

/// Lanczos ln Γ(x), accurate to ~15 digits for x >= 0.5
fn ln_gamma(x: f64) -> f64 {
    let x = x - 1.0;
    let series = LANCZOS_COEFFS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS_COEFFS[0], |acc, (i, &c)| acc + c / (x + i as f64 + 1.0));
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}
