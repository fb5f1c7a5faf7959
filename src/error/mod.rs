//! Error types for the AptoPlay SDK
//!
//! Two layers live here. [`AptoPlayError`] is the internal error used by
//! configuration, builders and the HTTP transport. [`NormalizedError`] is the
//! only error shape a caller of the public façade ever receives: every
//! failure is classified into a [`Fault`] and passed through
//! [`NormalizedError::normalize`] together with the operation's `kind` label.

mod normalized;

pub use normalized::{Fault, NormalizeResult, NormalizedError, SdkResult, TransportFault};

use thiserror::Error;

/// Internal error type for the AptoPlay SDK
#[derive(Error, Debug, Clone)]
pub enum AptoPlayError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration or builder validation error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Caller supplied an argument the backend would reject
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Server secret key is required for `/Server/*` endpoints
    #[error("Missing secret key")]
    MissingSecretKey,

    /// Response body did not have the expected envelope shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

/// Type alias for Results using AptoPlayError
pub type Result<T> = std::result::Result<T, AptoPlayError>;

impl AptoPlayError {
    /// Create an invalid-input error with a message
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        AptoPlayError::InvalidInput(msg.into())
    }
}

impl From<reqwest::Error> for AptoPlayError {
    fn from(error: reqwest::Error) -> Self {
        AptoPlayError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for AptoPlayError {
    fn from(error: serde_json::Error) -> Self {
        AptoPlayError::Serialization(error.to_string())
    }
}
