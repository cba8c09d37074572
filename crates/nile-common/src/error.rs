//! Error types for Nile Quest.

use thiserror::Error;

/// Errors raised by a key-value storage backend.
///
/// These never reach the player: stores log them and carry on with the
/// state they already hold.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Nothing stored under the key
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Backend refused the write (quota, read-only medium)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string did not name a known location or game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseIdError {
    kind: &'static str,
    value: String,
}

impl ParseIdError {
    /// Creates a parse error for the given ID family.
    #[must_use]
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
