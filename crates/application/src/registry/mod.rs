//! Function registry
//!
//! Maps identifiers to registered compute functions. Every entry carries its
//! own execution bookkeeping:
//!
//! - the variables it has completed successfully for (append-only),
//! - the variables it has an invocation in flight for, and
//! - the variables it read during its most recent invocation.

mod function;

use std::sync::Arc;

use dynamo_domain::FunctionId;
use indexmap::{IndexMap, IndexSet};
use parking_lot::Mutex;

use crate::engine::InvocationContext;
use crate::error::CallbackResult;

pub use function::{AsyncFunction, CssFunction, SyncFunction, from_async, from_sync};

/// A compute function together with its bookkeeping.
pub struct RegisteredFunction {
    id: FunctionId,
    callback: Box<dyn CssFunction>,
    executed_variables: Mutex<IndexSet<String>>,
    pending_variables: Mutex<IndexMap<String, usize>>,
    relative_variables: Mutex<IndexSet<String>>,
}

impl std::fmt::Debug for RegisteredFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredFunction")
            .field("id", &self.id)
            .field("executed_variables", &*self.executed_variables.lock())
            .field("pending_variables", &*self.pending_variables.lock())
            .field("relative_variables", &*self.relative_variables.lock())
            .finish_non_exhaustive()
    }
}

impl RegisteredFunction {
    /// Creates an entry with empty bookkeeping.
    #[must_use]
    pub fn new(id: FunctionId, callback: Box<dyn CssFunction>) -> Self {
        Self {
            id,
            callback,
            executed_variables: Mutex::new(IndexSet::new()),
            pending_variables: Mutex::new(IndexMap::new()),
            relative_variables: Mutex::new(IndexSet::new()),
        }
    }

    /// Returns the registration id.
    #[must_use]
    pub const fn id(&self) -> &FunctionId {
        &self.id
    }

    /// Runs the callback.
    pub(crate) async fn call(&self, variable: &str, context: &InvocationContext) -> CallbackResult {
        self.callback.compute(variable, context).await
    }

    /// Returns true once an invocation for `variable` has completed successfully.
    #[must_use]
    pub fn has_executed(&self, variable: &str) -> bool {
        self.executed_variables.lock().contains(variable)
    }

    /// Records a successful invocation. Returns false if it was already recorded.
    pub fn mark_executed(&self, variable: &str) -> bool {
        self.executed_variables.lock().insert(variable.to_string())
    }

    /// Variables completed so far, in completion order.
    #[must_use]
    pub fn executed_variables(&self) -> Vec<String> {
        self.executed_variables.lock().iter().cloned().collect()
    }

    /// Returns true while an invocation for `variable` is in flight.
    #[must_use]
    pub fn is_pending(&self, variable: &str) -> bool {
        self.pending_variables.lock().contains_key(variable)
    }

    /// Claims `variable` for a pass.
    ///
    /// Succeeds only if the pair has neither completed nor an invocation in
    /// flight; the pair is then in flight until [`Self::finish_invocation`].
    pub fn try_begin_invocation(&self, variable: &str) -> bool {
        let mut pending = self.pending_variables.lock();
        if pending.contains_key(variable) || self.has_executed(variable) {
            return false;
        }
        pending.insert(variable.to_string(), 1);
        true
    }

    /// Marks another invocation for `variable` as in flight, whatever the
    /// state of the pair.
    pub fn begin_invocation(&self, variable: &str) {
        *self
            .pending_variables
            .lock()
            .entry(variable.to_string())
            .or_default() += 1;
    }

    /// Ends one in-flight invocation for `variable`.
    pub fn finish_invocation(&self, variable: &str) {
        let mut pending = self.pending_variables.lock();
        if let Some(count) = pending.get_mut(variable) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                pending.shift_remove(variable);
            }
        }
    }

    /// Forgets the reads of the previous invocation.
    pub fn reset_dependencies(&self) {
        self.relative_variables.lock().clear();
    }

    /// Records a read of `variable`.
    pub fn record_dependency(&self, variable: &str) {
        let mut relative = self.relative_variables.lock();
        if !relative.contains(variable) {
            relative.insert(variable.to_string());
        }
    }

    /// Returns true if the most recent invocation read `variable`.
    #[must_use]
    pub fn depends_on(&self, variable: &str) -> bool {
        self.relative_variables.lock().contains(variable)
    }

    /// Variables read by the most recent invocation, in read order.
    #[must_use]
    pub fn relative_variables(&self) -> Vec<String> {
        self.relative_variables.lock().iter().cloned().collect()
    }
}

/// Registered functions in insertion order.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: IndexMap<FunctionId, Arc<RegisteredFunction>>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a function under `id` with fresh bookkeeping.
    ///
    /// An existing entry with the same id is replaced in place, keeping its
    /// position in the invocation order.
    pub fn insert(
        &mut self,
        id: FunctionId,
        callback: Box<dyn CssFunction>,
    ) -> Arc<RegisteredFunction> {
        let function = Arc::new(RegisteredFunction::new(id.clone(), callback));
        self.functions.insert(id, Arc::clone(&function));
        function
    }

    /// Removes the entry for `id`, keeping the order of the others.
    pub fn remove(&mut self, id: &str) -> Option<Arc<RegisteredFunction>> {
        self.functions.shift_remove(id)
    }

    /// Returns the entry for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<RegisteredFunction>> {
        self.functions.get(id).cloned()
    }

    /// Returns true if `function` is the entry currently registered under its id.
    #[must_use]
    pub fn is_current(&self, function: &Arc<RegisteredFunction>) -> bool {
        self.functions
            .get(function.id())
            .is_some_and(|current| Arc::ptr_eq(current, function))
    }

    /// Returns all entries in invocation order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<RegisteredFunction>> {
        self.functions.values().cloned().collect()
    }

    /// Returns the entries whose most recent invocation read `variable`.
    #[must_use]
    pub fn dependents_of(&self, variable: &str) -> Vec<Arc<RegisteredFunction>> {
        self.functions
            .values()
            .filter(|function| function.depends_on(variable))
            .cloned()
            .collect()
    }

    /// Returns the registered ids in invocation order.
    #[must_use]
    pub fn ids(&self) -> Vec<FunctionId> {
        self.functions.keys().cloned().collect()
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
