//! Log subscriber for the server binary
//!
//! The filter comes from `RUST_LOG` when it is set and parses; otherwise from the level given
//! on the command line (`--log-level` / `TAILRISK_LOG`, `info` by default). Events go to stdout
//! through the `fmt` layer.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber, failing if one is already in place
pub fn init_logging(level: &str) -> Result<(), TryInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::new(level),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
}
