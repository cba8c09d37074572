//! Engine error types.

use thiserror::Error;

/// Errors raised while wiring up the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Log filter directives could not be parsed
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidLogFilter {
        /// Offending directives
        filter: String,
        /// Parser message
        reason: String,
    },
    /// A global subscriber is already installed
    #[error("Logging already initialized: {0}")]
    LoggingInitialized(String),
}

/// Result alias for engine setup.
pub type EngineResult<T> = Result<T, EngineError>;
