//! Core error types for healthlog-core.
//!
//! The only user-facing failure is a record submission missing a required
//! field. Everything else here is either a gate misuse by the host or a
//! configuration problem.

use std::path::PathBuf;
use thiserror::Error;

use crate::form::{RecordField, UnknownField};

/// Core error type for healthlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Field key that names nothing on the active form
    #[error("{0}")]
    UnknownField(#[from] UnknownField),

    /// Profile gate errors
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Record validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date or weight was left empty.
    #[error("Missing required field '{field}'")]
    MissingRequiredField { field: RecordField },
}

impl ValidationError {
    /// Text shown to the user as a blocking notice.
    pub fn notice(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { .. } => "Please enter a date and weight",
        }
    }
}

/// Errors from reaching past the profile gate in the wrong state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    /// Record form or dashboard requested before a profile exists.
    #[error("No profile has been saved yet")]
    ProfileRequired,

    /// Profile form submitted after the gate already opened.
    #[error("A profile is already saved for this session")]
    ProfileAlreadySet,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_names_the_field() {
        let err = ValidationError::MissingRequiredField {
            field: RecordField::Weight,
        };
        assert_eq!(err.to_string(), "Missing required field 'weight'");
        assert_eq!(err.notice(), "Please enter a date and weight");
    }

    #[test]
    fn validation_converts_into_core_error() {
        let err: CoreError = ValidationError::MissingRequiredField {
            field: RecordField::Date,
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
