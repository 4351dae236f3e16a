//! Structured logging

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins over `service.log_level`. Development gets compact
/// human-readable lines, every other environment JSON.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = build_filter(&config.service.log_level);

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.service.environment.is_development() {
        subscriber.compact().try_init()
    } else {
        subscriber.json().try_init()
    };
    result.map_err(|e| Error::Internal(format!("Failed to initialize tracing: {}", e)))?;

    tracing::info!(
        environment = %config.service.environment,
        "Tracing initialized for service: {}",
        config.service.name
    );

    Ok(())
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
