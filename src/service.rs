//! HTTP endpoints
//!
//! Every computation is reachable as a JSON `POST`; bodies mirror the function arguments and
//! responses carry a single capitalised key per result, e.g. `{"VaR": 3.0}`.
//! Failures come back as `{"error": "..."}` with a 4xx status for bad input and 422 when the
//! VaR scan finds no crossing.
//!
//! The amount of work a request can ask for is capped by [`ServiceLimits`]: `trials` for the
//! risk endpoints and `max_samples` for the Monte-Carlo one. The computations themselves run on
//! the blocking pool so a long scan doesn't hold up the async workers.

use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Responder, ResponseError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tailrisk_derive::From;
use thiserror::Error;
use tracing::{info, warn};

use crate::dispersion::compute_standard_deviation;
use crate::error::RiskError;
use crate::risk::{compute_cvar, compute_var};
use crate::simulation::{ConvergingAverage, EuropeanOption, OptionType, PriceModel};

/// Wraps every error a handler can hit; `From` comes from the custom derive
#[derive(Error, Debug, From)]
pub enum ApiError {
    #[error(transparent)]
    Risk(RiskError),
    #[error(transparent)]
    Payload(JsonPayloadError),
    #[error(transparent)]
    Blocking(BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Risk(RiskError::SearchExhausted { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Risk(_) | ApiError::Payload(_) => StatusCode::BAD_REQUEST,
            ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        warn!(error = %self, "request failed");
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Upper bounds on the work a single request may ask for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ServiceLimits {
    pub max_trials: u64,
    pub max_samples: u64,
}

impl Default for ServiceLimits {
    fn default() -> Self {
        Self {
            max_trials: 1_000_000,
            max_samples: 10_000_000,
        }
    }
}

impl ServiceLimits {
    fn check(name: &'static str, requested: u64, ceiling: u64) -> Result<(), RiskError> {
        if requested > ceiling {
            return Err(RiskError::InvalidParameter {
                name,
                value: requested as f64,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RiskRequest {
    confidence_level: f64,
    trials: u64,
    success_probability: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DispersionRequest {
    values: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionRequest {
    form: OptionType,
    strike: f64,
    generator: PriceModel,
    #[serde(default = "default_tolerance")]
    tolerance: f64,
    #[serde(default = "default_batch_size")]
    batch_size: u64,
    #[serde(default = "default_max_samples")]
    max_samples: u64,
    seed: Option<u64>,
}

fn default_tolerance() -> f64 {
    0.001
}

fn default_batch_size() -> u64 {
    1_000
}

fn default_max_samples() -> u64 {
    1_000_000
}

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("tailrisk is up")
}

#[post("/risk/var")]
async fn var(
    item: web::Json<RiskRequest>,
    limits: web::Data<ServiceLimits>,
) -> Result<HttpResponse, ApiError> {
    info!(request = ?item, "VaR");
    let RiskRequest {
        confidence_level,
        trials,
        success_probability,
    } = item.into_inner();
    ServiceLimits::check("trials", trials, limits.max_trials)?;
    let var =
        web::block(move || compute_var(confidence_level, trials, success_probability)).await??;
    Ok(HttpResponse::Ok().json(json!({ "VaR": var })))
}

#[post("/risk/cvar")]
async fn cvar(
    item: web::Json<RiskRequest>,
    limits: web::Data<ServiceLimits>,
) -> Result<HttpResponse, ApiError> {
    info!(request = ?item, "CVaR");
    let RiskRequest {
        confidence_level,
        trials,
        success_probability,
    } = item.into_inner();
    ServiceLimits::check("trials", trials, limits.max_trials)?;
    let cvar =
        web::block(move || compute_cvar(confidence_level, trials, success_probability)).await??;
    Ok(HttpResponse::Ok().json(json!({ "CVaR": cvar })))
}

#[post("/statistics/std")]
async fn standard_deviation(item: web::Json<DispersionRequest>) -> Result<HttpResponse, ApiError> {
    info!(values = item.values.len(), "standard deviation");
    let values = item.into_inner().values;
    let std = web::block(move || compute_standard_deviation(&values)).await??;
    Ok(HttpResponse::Ok().json(json!({ "StandardDeviation": std })))
}

#[post("/simulation/option")]
async fn option_price(
    item: web::Json<OptionRequest>,
    limits: web::Data<ServiceLimits>,
) -> Result<HttpResponse, ApiError> {
    info!(request = ?item, "Monte-Carlo option");
    let item = item.into_inner();
    ServiceLimits::check("max_samples", item.max_samples, limits.max_samples)?;
    let contract = EuropeanOption::new(item.form, item.strike)?;
    item.generator.validate()?;
    let averager = ConvergingAverage::new(item.tolerance, item.batch_size, item.max_samples)?;
    let generator = item.generator;
    let seed = item.seed;
    // sampling is CPU bound, keep it off the async workers
    let estimate = web::block(move || {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        averager.average(|| contract.simulate_payout(&generator, &mut rng))
    })
    .await?;
    Ok(HttpResponse::Ok().json(json!({
        "Price": estimate.mean,
        "Samples": estimate.samples,
        "Converged": estimate.converged,
    })))
}

/// Registers every endpoint with the default [`ServiceLimits`]
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_with(ServiceLimits::default())(cfg)
}

/// Registers every endpoint plus a JSON extractor that reports malformed bodies as [`ApiError`]
pub fn configure_with(limits: ServiceLimits) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(limits))
            .app_data(
                web::JsonConfig::default().error_handler(|err, _req| ApiError::from(err).into()),
            )
            .service(hello)
            .service(var)
            .service(cvar)
            .service(standard_deviation)
            .service(option_price);
    }
}
