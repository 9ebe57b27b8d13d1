//! Value at Risk and Conditional Value at Risk of a binomial loss
//!
//! Losses are modelled as the number of successes out of `trials`, centred on the mean
//! `μ = trials × success_probability`. The centred loss `L = x - μ` runs from `-μ` up to
//! `trials - μ` in unit steps, so the worst outcomes (fewest successes) come first.
//!
//! # VaR
//! The scan accumulates the probability mass of each count in increasing order and stops at
//! the first count `x*` whose cumulative mass is strictly greater than `1 - confidence_level`.
//! The [VaR](https://en.wikipedia.org/wiki/Value_at_risk) is the magnitude `μ - x*` of that
//! centred loss. It is a whole number whenever `μ` is, and shares the fractional part of `μ`
//! otherwise.
//!
//! # CVaR
//! The [CVaR](https://en.wikipedia.org/wiki/Expected_shortfall) averages the centred loss over
//! the tail `x = 0..=x*`, weighted by the probability mass and scaled by
//! `-1 / (1 - confidence_level)`, which yields a positive magnitude that is never below the VaR.
//!
//! # Usage:
//! ```
//! use tailrisk::risk::{compute_cvar, compute_var};
//!
//! let var = compute_var(0.95, 10, 0.5).unwrap();
//! assert_eq!(var, 3.0);
//! let cvar = compute_cvar(0.95, 10, 0.5).unwrap();
//! assert!(cvar >= var);
//! ```

use tracing::{debug, trace};

use crate::binomial::BinomialParameters;
use crate::error::RiskError;

/// Returns the first count whose cumulative mass exceeds `1 - confidence_level`
pub fn tail_quantile(confidence_level: f64, params: &BinomialParameters) -> Result<u64, RiskError> {
    if !(0.0..=1.0).contains(&confidence_level) {
        return Err(RiskError::InvalidConfidenceLevel(confidence_level));
    }
    let threshold = 1.0 - confidence_level;
    let mut cumulative = 0.0;
    for x in 0..=params.trials() {
        cumulative += params.pmf(x);
        // strict: landing exactly on the threshold keeps scanning
        if cumulative > threshold {
            trace!(x, cumulative, threshold, "VaR threshold crossed");
            return Ok(x);
        }
    }
    debug!(
        confidence_level,
        trials = params.trials(),
        success_probability = params.success_probability(),
        cumulative,
        "VaR scan exhausted the support"
    );
    Err(RiskError::SearchExhausted {
        confidence_level,
        trials: params.trials(),
        success_probability: params.success_probability(),
    })
}

/// Calculates the VaR of Binomial(trials, success_probability) at `confidence_level`
///
/// The result is an `f64` rather than an integer: it is the exact centred magnitude `μ - x*`.
/// That is a whole number whenever `trials × success_probability` is, e.g. `3.0` for
/// Binomial(10, 0.5) at 0.95. With a fractional mean, rounding would move the VaR off the
/// support point that bounds the CVaR tail, so the fraction is kept.
pub fn compute_var(
    confidence_level: f64,
    trials: u64,
    success_probability: f64,
) -> Result<f64, RiskError> {
    let params = BinomialParameters::new(trials, success_probability)?;
    let quantile = tail_quantile(confidence_level, &params)?;
    Ok(params.mean() - quantile as f64)
}

/// Calculates the CVaR of Binomial(trials, success_probability) at `confidence_level`
pub fn compute_cvar(
    confidence_level: f64,
    trials: u64,
    success_probability: f64,
) -> Result<f64, RiskError> {
    // 1 would divide by zero in the multiplier
    if !(0.0..1.0).contains(&confidence_level) {
        return Err(RiskError::InvalidConfidenceLevel(confidence_level));
    }
    let params = BinomialParameters::new(trials, success_probability)?;
    let quantile = tail_quantile(confidence_level, &params)?;
    let mul = -1.0 / (1.0 - confidence_level);
    let mu = params.mean();
    // the tail ends at the crossing count itself, so it always holds L = -VaR
    Ok((0..=quantile).fold(0.0, |acc, x| {
        let centred = x as f64 - mu;
        acc + mul * centred * params.pmf(x)
    }))
}
