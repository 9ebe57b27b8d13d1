//! Population standard deviation
//!
//! Computed in a single pass as `sqrt(E[X²] - E[X]²)` over the values shifted by the first one,
//! which leaves the variance unchanged and makes constant data come out exactly zero.
//! Cancellation can still push the radicand a hair below zero, in which case it is clamped to
//! zero rather than reported, since the true variance can't be negative.

use crate::error::RiskError;

/// Calculates the population standard deviation of `values`
pub fn compute_standard_deviation(values: &[f64]) -> Result<f64, RiskError> {
    if values.is_empty() {
        return Err(RiskError::EmptyInput);
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(RiskError::NonFiniteValue { index });
    }
    let size = values.len() as f64;
    let shift = values[0];
    let (sum, sum_sq) = values.iter().fold((0.0, 0.0), |(s, sq), &x| {
        let d = x - shift;
        (s + d, sq + d * d)
    });
    let avg_x = sum / size;
    let avg_xx = sum_sq / size;
    Ok((avg_xx - avg_x * avg_x).max(0.0).sqrt())
}
