//! Dynamo Domain - Core types
//!
//! This crate defines the domain model for the Dynamo CSS variable engine.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod id;
pub mod variable;

pub use error::{DomainError, DomainResult};
pub use id::FunctionId;
pub use variable::{KnownVariables, ParsedVariable, parse_variable};
