//! Error types for the authorization engine
//!
//! A denied request is a `false` result, never an error. These variants are
//! raised while parsing identifiers and loading configuration.

use thiserror::Error;

/// Authorization engine errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Invalid input (unparseable resource, action or scope)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid permission table definition
    #[error("Invalid permission table: {0}")]
    InvalidTable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from the shared core (session store, role parsing)
    #[error(transparent)]
    Core(#[from] hrm_core::CoreError),

    /// JSON error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
