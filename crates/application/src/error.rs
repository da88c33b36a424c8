//! Application error types

use dynamo_domain::DomainError;
use thiserror::Error;

use crate::ports::SourceError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A style source could not be read.
    #[error("style source error: {0}")]
    Source(#[from] SourceError),

    /// The engine was created outside of a Tokio runtime.
    #[error("no Tokio runtime available to drive the engine")]
    NoRuntime,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Error raised by a registered compute function.
#[derive(Debug, Error)]
pub enum CallbackError {
    /// A plain failure message.
    #[error("{0}")]
    Message(String),

    /// Any other error raised by the callback.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl CallbackError {
    /// Creates an error from a message.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Outcome of one callback invocation.
///
/// `Ok(Some(value))` asks the engine to store `value` for the invoked variable.
pub type CallbackResult = Result<Option<String>, CallbackError>;
