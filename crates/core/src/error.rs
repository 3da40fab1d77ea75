//! Domain error model.
//!
//! Deterministic business failures only. Anything infrastructural (storage,
//! dispatch) has its own error type closer to where it happens.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation (blank name, zero price, zero quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A state transition broke a domain rule (e.g. activating a customer
    /// without an address).
    #[error("domain invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid id: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
