//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures a caller can act on. Every
/// variant is recoverable at the request boundary; none is fatal to the
/// process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be decoded (malformed id or payload).
    #[error("decode failed: {0}")]
    Decode(String),

    /// A decoded value failed validation (e.g. a required field is empty).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// The backing store could not serve the request.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
