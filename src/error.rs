//! Error types for viewport configuration.
//!
//! Geometry, gesture and animation code never fails: degenerate input is
//! recovered where it happens. Only loading a configuration can go wrong.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`ViewportConfig`](crate::ViewportConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the engine cannot work with
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        message: String,
    },

    /// The file was written by a newer version of the format
    #[error("Version mismatch: expected at most {expected}, found {found}")]
    VersionMismatch {
        /// Newest version this build understands
        expected: u32,
        /// Version found in the file
        found: u32,
    },
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
