//! Caller-side handle to a registered function.

use std::sync::{Arc, Weak};

use dynamo_domain::FunctionId;

use super::EngineInner;
use crate::registry::RegisteredFunction;

/// Returned by a successful registration.
#[derive(Debug, Clone)]
pub struct FunctionHandle {
    function: Arc<RegisteredFunction>,
    engine: Weak<EngineInner>,
}

impl FunctionHandle {
    pub(crate) const fn new(function: Arc<RegisteredFunction>, engine: Weak<EngineInner>) -> Self {
        Self { function, engine }
    }

    /// The id this function was registered under.
    #[must_use]
    pub fn id(&self) -> &FunctionId {
        self.function.id()
    }

    /// Variables this registration has completed successfully for.
    #[must_use]
    pub fn executed_variables(&self) -> Vec<String> {
        self.function.executed_variables()
    }

    /// Returns true while an invocation of this registration for `variable`
    /// is running.
    #[must_use]
    pub fn is_pending(&self, variable: &str) -> bool {
        self.function.is_pending(variable)
    }

    /// Variables read during the most recent invocation.
    #[must_use]
    pub fn relative_variables(&self) -> Vec<String> {
        self.function.relative_variables()
    }

    /// Removes whatever is registered under this handle's id.
    ///
    /// Returns false if nothing was registered under it or the engine is gone.
    pub fn unregister(&self) -> bool {
        self.engine
            .upgrade()
            .is_some_and(|engine| engine.registry.lock().remove(self.id().as_str()).is_some())
    }
}
