//! Core error types.
//!
//! The calculator itself is total and never fails. Errors only arise when
//! parsing configuration values or textual input into the domain types.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidConfigValue { key: String, reason: String },
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Wraps a parse failure with the configuration key that produced it.
    pub fn config(key: &str, err: impl std::fmt::Display) -> Self {
        Error::InvalidConfigValue {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }
}
