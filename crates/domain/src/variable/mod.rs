//! Custom property (CSS variable) domain types

mod known;
mod parsed;

pub use known::KnownVariables;
pub use parsed::{ParsedVariable, parse_variable};
