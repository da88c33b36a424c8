//! Dynamo Application - Reactive variable engine
//!
//! This crate defines the engine core with:
//! - Variable discovery from raw style text
//! - The function registry and its per-function bookkeeping
//! - The execution engine and dependency propagation
//! - Port traits for the host environment

pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod ports;
pub mod registry;
pub mod store;

pub use config::EngineConfig;
pub use engine::{Engine, FunctionHandle, InvocationContext};
pub use error::{ApplicationError, ApplicationResult, CallbackError, CallbackResult};
pub use extractor::{StyleBatch, scan_variable_references};
pub use ports::{SourceError, StyleSource, ValueStore};
pub use registry::{CssFunction, FunctionRegistry, RegisteredFunction, from_async, from_sync};
pub use store::InMemoryValueStore;
