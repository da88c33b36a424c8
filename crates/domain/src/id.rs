//! Function identifiers.

use std::borrow::Borrow;
use std::fmt;

use crate::error::{DomainError, DomainResult};

/// Key under which a compute function is registered.
///
/// Any non-empty string is accepted; the id is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(String);

impl FunctionId {
    /// Validates and wraps an identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFunctionId` if `id` is empty.
    pub fn parse(id: impl Into<String>) -> DomainResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::InvalidFunctionId(id));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FunctionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FunctionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
