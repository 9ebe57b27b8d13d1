//! Server configuration, read from flags or the environment

use clap::Parser;

use crate::service::ServiceLimits;

#[derive(Debug, Clone, Parser)]
#[command(name = "tailrisk", version, about = "VaR, CVaR and Monte-Carlo payouts over HTTP")]
pub struct ServerConfig {
    /// Address to bind the HTTP server to
    #[arg(long, env = "TAILRISK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "TAILRISK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "TAILRISK_LOG", default_value = "info")]
    pub log_level: String,

    /// Largest `trials` accepted by the VaR and CVaR endpoints
    #[arg(long, env = "TAILRISK_MAX_TRIALS", default_value_t = 1_000_000)]
    pub max_trials: u64,

    /// Largest `max_samples` accepted by the Monte-Carlo endpoint
    #[arg(long, env = "TAILRISK_MAX_SAMPLES", default_value_t = 10_000_000)]
    pub max_samples: u64,
}

impl ServerConfig {
    pub fn bind_address(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    pub fn limits(&self) -> ServiceLimits {
        ServiceLimits {
            max_trials: self.max_trials,
            max_samples: self.max_samples,
        }
    }
}
