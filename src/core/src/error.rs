//! Unified error types for the HRM core
//!
//! Authorization outcomes are never errors. These variants cover parsing
//! stored credentials and loading configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the HRM platform
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid input/state
    #[error("Invalid: {0}")]
    Invalid(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an invalid error
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        CoreError::Invalid(msg.into())
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        CoreError::Serialization(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        CoreError::Configuration(msg.into())
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        CoreError::NotFound(msg.into())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
