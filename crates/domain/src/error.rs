//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A function identifier is empty.
    #[error("invalid function id: {0:?}")]
    InvalidFunctionId(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
