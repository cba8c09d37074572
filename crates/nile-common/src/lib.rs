//! # Nile Common
//!
//! Common types shared by the Nile Quest crates:
//! - Location, game, fact and collectible identifiers
//! - Storage and parsing error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_reports_input() {
        let err = "oasis".parse::<Location>().expect_err("not a location");
        assert_eq!(err.value(), "oasis");
        assert_eq!(err.to_string(), "unknown location: \"oasis\"");
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
