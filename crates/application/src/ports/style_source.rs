//! Style source port
//!
//! Hosts feed raw style text to the engine. A `StyleSource` is the pull
//! side of that contract: it produces one batch of rule texts on demand.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::extractor::StyleBatch;

/// Errors that can occur while collecting style text.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source does not exist.
    #[error("style source not found: {0}")]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces raw style-rule text for variable discovery.
#[async_trait]
pub trait StyleSource: Send + Sync {
    /// Collects the current style text as one batch.
    ///
    /// # Errors
    /// Returns an error if the source as a whole cannot be read.
    async fn collect(&self) -> Result<StyleBatch, SourceError>;
}
