//! Engine configuration

use serde::Deserialize;

/// Tunables for the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Store the non-empty value a callback returns as if it had called
    /// `set_value`.
    pub apply_returned_values: bool,

    /// Ignore writes that would store the value already present.
    /// Such writes then trigger no dependency propagation either.
    pub skip_unchanged_writes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            apply_returned_values: true,
            skip_unchanged_writes: false,
        }
    }
}
