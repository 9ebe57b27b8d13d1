//! Monte-Carlo payouts
//!
//! # Price generators
//! Terminal prices are drawn as `spot × (1 + z + periods × rate)` where `z` is a centred
//! Gaussian shock whose standard deviation grows with `sqrt(periods)`. The
//! [`MixturePriceGenerator`] averages two independent shocks with different volatilities,
//! which fattens the tails compared to a single [`GaussianPriceGenerator`].
//!
//! # Payouts
//! A [`EuropeanOption`] pays out on any [`PriceSource`], so the same option can be valued
//! under either generator.
//!
//! # Usage:
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tailrisk::simulation::{ConvergingAverage, EuropeanOption, GaussianPriceGenerator, OptionType};
//!
//! let generator = GaussianPriceGenerator::new(0.0001, 252, 0.001, 100.0).unwrap();
//! let call = EuropeanOption::new(OptionType::Call, 100.0).unwrap();
//! let averager = ConvergingAverage::new(0.001, 1_000, 100_000).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let estimate = averager.average(|| call.simulate_payout(&generator, &mut rng));
//! println!("{:?}", estimate);
//! ```

use rand::Rng;
use rstat::univariate::normal::Normal;
use rstat::Distribution;
use serde::{Deserialize, Serialize};

use crate::error::RiskError;

/// Anything that can draw a terminal price
pub trait PriceSource {
    fn price<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;
}

fn check_finite(name: &'static str, value: f64) -> Result<(), RiskError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RiskError::InvalidParameter { name, value })
    }
}

fn check_volatility(name: &'static str, value: f64) -> Result<(), RiskError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(RiskError::InvalidParameter { name, value });
    }
    Ok(())
}

fn terminal_price(spot: f64, rate: f64, periods: u32, shock: f64) -> f64 {
    spot * (1.0 + shock + periods as f64 * rate)
}

/// Single Gaussian shock per draw
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct GaussianPriceGenerator {
    rate: f64,
    periods: u32,
    sigma: f64,
    spot: f64,
}

impl GaussianPriceGenerator {
    pub fn new(rate: f64, periods: u32, sigma: f64, spot: f64) -> Result<Self, RiskError> {
        let generator = Self {
            rate,
            periods,
            sigma,
            spot,
        };
        generator.validate()?;
        Ok(generator)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        check_finite("rate", self.rate)?;
        check_finite("spot", self.spot)?;
        check_volatility("sigma", self.sigma)
    }
}

impl PriceSource for GaussianPriceGenerator {
    fn price<R: Rng + ?Sized>(&self, mut rng: &mut R) -> f64 {
        let z = Normal::standard().sample(&mut rng) * self.sigma * (self.periods as f64).sqrt();
        terminal_price(self.spot, self.rate, self.periods, z)
    }
}

/// Equal-weight blend of two independent Gaussian shocks
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct MixturePriceGenerator {
    rate: f64,
    periods: u32,
    sigma_one: f64,
    sigma_two: f64,
    spot: f64,
}

impl MixturePriceGenerator {
    pub fn new(
        rate: f64,
        periods: u32,
        sigma_one: f64,
        sigma_two: f64,
        spot: f64,
    ) -> Result<Self, RiskError> {
        let generator = Self {
            rate,
            periods,
            sigma_one,
            sigma_two,
            spot,
        };
        generator.validate()?;
        Ok(generator)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        check_finite("rate", self.rate)?;
        check_finite("spot", self.spot)?;
        check_volatility("sigma_one", self.sigma_one)?;
        check_volatility("sigma_two", self.sigma_two)
    }
}

impl PriceSource for MixturePriceGenerator {
    fn price<R: Rng + ?Sized>(&self, mut rng: &mut R) -> f64 {
        let normal = Normal::standard();
        let first = normal.sample(&mut rng) * self.sigma_one;
        let second = normal.sample(&mut rng) * self.sigma_two;
        let z = 0.5 * (first + second) * (self.periods as f64).sqrt();
        terminal_price(self.spot, self.rate, self.periods, z)
    }
}

/// Either generator, tagged by `kind` when (de)serialized
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceModel {
    Gaussian(GaussianPriceGenerator),
    Mixture(MixturePriceGenerator),
}

impl PriceModel {
    pub fn validate(&self) -> Result<(), RiskError> {
        match self {
            PriceModel::Gaussian(g) => g.validate(),
            PriceModel::Mixture(m) => m.validate(),
        }
    }
}

impl PriceSource for PriceModel {
    fn price<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            PriceModel::Gaussian(g) => g.price(rng),
            PriceModel::Mixture(m) => m.price(rng),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

/// Holds the option data
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct EuropeanOption {
    form: OptionType,
    strike: f64,
}

impl EuropeanOption {
    pub fn new(form: OptionType, strike: f64) -> Result<Self, RiskError> {
        check_finite("strike", strike)?;
        Ok(Self { form, strike })
    }

    /// Payout at expiry for a given terminal price
    pub fn payout(&self, terminal: f64) -> f64 {
        match self.form {
            OptionType::Call => (terminal - self.strike).max(0.0),
            OptionType::Put => (self.strike - terminal).max(0.0),
        }
    }

    /// Draws one terminal price from `source` and pays out on it
    pub fn simulate_payout<S: PriceSource, R: Rng + ?Sized>(&self, source: &S, rng: &mut R) -> f64 {
        self.payout(source.price(rng))
    }
}

/// Outcome of a [`ConvergingAverage`] run
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct AverageEstimate {
    pub mean: f64,
    pub samples: u64,
    pub converged: bool,
}

/// Samples in batches until the running mean moves by less than `tolerance` between batches
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConvergingAverage {
    tolerance: f64,
    batch_size: u64,
    max_samples: u64,
}

impl ConvergingAverage {
    pub fn new(tolerance: f64, batch_size: u64, max_samples: u64) -> Result<Self, RiskError> {
        check_finite("tolerance", tolerance)?;
        if tolerance <= 0.0 {
            return Err(RiskError::InvalidParameter {
                name: "tolerance",
                value: tolerance,
            });
        }
        if batch_size == 0 {
            return Err(RiskError::InvalidParameter {
                name: "batch_size",
                value: 0.0,
            });
        }
        if max_samples == 0 {
            return Err(RiskError::InvalidParameter {
                name: "max_samples",
                value: 0.0,
            });
        }
        Ok(Self {
            tolerance,
            batch_size,
            max_samples,
        })
    }

    pub fn average<F: FnMut() -> f64>(&self, mut sampler: F) -> AverageEstimate {
        let mut total = 0.0;
        let mut samples = 0u64;
        let mut previous: Option<f64> = None;
        while samples < self.max_samples {
            let batch = self.batch_size.min(self.max_samples - samples);
            for _ in 0..batch {
                total += sampler();
            }
            samples += batch;
            let mean = total / samples as f64;
            if previous.map_or(false, |p| (mean - p).abs() < self.tolerance) {
                return AverageEstimate {
                    mean,
                    samples,
                    converged: true,
                };
            }
            previous = Some(mean);
        }
        AverageEstimate {
            mean: previous.unwrap_or(0.0),
            samples,
            converged: false,
        }
    }
}
