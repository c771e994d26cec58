//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Result};

/// Initialize tracing with JSON output
///
/// The filter comes from `service.log_level`; an invalid directive falls back
/// to `info` rather than failing startup.
pub fn init_tracing(config: &Config) -> Result<()> {
    let log_level = config.service.log_level.clone();

    // try_init so a second call (tests, embedded use) is a no-op
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    tracing::info!("Tracing initialized for service: {}", config.service.name);

    Ok(())
}
