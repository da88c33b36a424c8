//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the engine and the host environment.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod style_source;
mod value_store;

pub use style_source::{SourceError, StyleSource};
pub use value_store::ValueStore;
