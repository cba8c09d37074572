//! Logging setup.

use crate::config::{EngineConfig, LogFormat};
use crate::error::{EngineError, EngineResult};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Builds the filter: `RUST_LOG` if set, otherwise `fallback`.
pub fn env_filter(fallback: &str) -> EngineResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).map_err(|e| EngineError::InvalidLogFilter {
        filter: fallback.to_string(),
        reason: e.to_string(),
    })
}

/// Installs the global tracing subscriber described by `config`.
pub fn init_logging(config: &EngineConfig) -> EngineResult<()> {
    let filter = env_filter(&config.log_filter)?;
    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    installed.map_err(|e| EngineError::LoggingInitialized(e.to_string()))?;

    info!("Nile Quest starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
