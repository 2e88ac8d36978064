use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Validates a log filter: a bare level or `RUST_LOG`-style directives
pub fn validate_log_level(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| {
        Error::config(format!(
            "Invalid log level: '{}' ({}). Use error, warn, info, debug, trace or target=level directives",
            level, e
        ))
    })
}

/// Picks the level (`RUST_LOG` wins over config), validates it and installs
/// the JSON subscriber. Returns the level in effect.
pub fn init(configured_level: &str) -> Result<String> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| configured_level.to_string());
    let filter = validate_log_level(&log_level)?;

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    Ok(log_level)
}
