//! Tail risk of a binomial loss distribution
//!
//! - [`risk`] computes the VaR and CVaR of Binomial(trials, success_probability) losses
//! - [`dispersion`] computes a population standard deviation
//! - [`simulation`] values European options by Monte-Carlo over Gaussian price generators
//! - [`service`] exposes all of the above as JSON endpoints
//!
//! Usage:
//! ```
//! use tailrisk::{compute_cvar, compute_standard_deviation, compute_var};
//!
//! assert_eq!(compute_var(0.95, 10, 0.5), Ok(3.0));
//! assert!(compute_cvar(1.0, 10, 0.5).is_err());
//! assert!(compute_standard_deviation(&[]).is_err());
//! ```

pub mod binomial;
pub mod config;
pub mod dispersion;
pub mod error;
pub mod risk;
pub mod service;
pub mod simulation;
pub mod telemetry;

pub use binomial::BinomialParameters;
pub use dispersion::compute_standard_deviation;
pub use error::RiskError;
pub use risk::{compute_cvar, compute_var};
