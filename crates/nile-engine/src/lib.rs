//! Nile Engine - session wiring for the Nile Quest storybook.
//!
//! This crate loads the configuration, installs logging, chooses the
//! snapshot backend and hands the host a [`GameSession`] to drive.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod session;
pub mod telemetry;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::session::*;
    pub use crate::telemetry::*;
}

pub use prelude::*;

/// Loads the configuration at the default location, installs logging and
/// opens a session.
///
/// A logger installed earlier by the host is kept.
pub fn start() -> GameSession {
    let config = EngineConfig::load();
    if let Err(e) = init_logging(&config) {
        tracing::warn!("{e}");
    }
    GameSession::new(config)
}
