use tracing_subscriber::EnvFilter;

use crate::ftc::scout::error::{Result, ScoutError};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise this crate logs at `level`.
pub fn init(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("ftc_scout_export={level}"))
            .map_err(|err| ScoutError::Logging(format!("invalid log level '{level}': {err}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| ScoutError::Logging(err.to_string()))
}
