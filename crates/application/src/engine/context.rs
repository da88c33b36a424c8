//! Per-invocation access to the engine.

use std::fmt;
use std::sync::{Arc, Weak};

use dynamo_domain::{ParsedVariable, parse_variable};

use super::EngineInner;
use crate::registry::RegisteredFunction;

/// Handed to a callback for one invocation.
///
/// Writes always target the variable the invocation was started for; reads
/// are recorded as dependencies of the invoked function.
#[derive(Clone)]
pub struct InvocationContext {
    engine: Weak<EngineInner>,
    function: Arc<RegisteredFunction>,
    variable: String,
}

impl InvocationContext {
    pub(crate) const fn new(
        engine: Weak<EngineInner>,
        function: Arc<RegisteredFunction>,
        variable: String,
    ) -> Self {
        Self {
            engine,
            function,
            variable,
        }
    }

    /// The variable this invocation was started for.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The invoked variable decomposed by the structured-name grammar.
    #[must_use]
    pub fn parsed(&self) -> Option<ParsedVariable> {
        parse_variable(&self.variable)
    }

    /// Stores `value` as the resolved value of the invoked variable and
    /// re-runs every function that read it.
    ///
    /// Returns false if the engine has already been torn down.
    pub fn set_value(&self, value: impl Into<String>) -> bool {
        let Some(engine) = self.engine.upgrade() else {
            return false;
        };
        engine.write(&self.variable, value.into());
        true
    }

    /// Reads the resolved value of `name` and records it as a dependency.
    ///
    /// An empty name yields `None` without recording anything. A variable
    /// that was never written reads as an empty string.
    pub fn get_variable(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        let engine = self.engine.upgrade()?;
        self.function.record_dependency(name);
        Some(engine.store.get(name).unwrap_or_default())
    }
}

impl fmt::Debug for InvocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationContext")
            .field("function", self.function.id())
            .field("variable", &self.variable)
            .finish_non_exhaustive()
    }
}
