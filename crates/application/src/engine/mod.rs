//! Reactive execution engine
//!
//! Runs registered functions against discovered variables and re-runs them
//! when a variable they read is written.
//!
//! For every (function, variable) pair the engine tracks whether an
//! invocation is in flight and whether one has completed successfully. A
//! full pass walks the known variables (newest first) and, for each, the
//! registered functions in registration order, invoking every pair that is
//! neither in flight nor completed.
//! Passes start whenever new variables are discovered and whenever a
//! function is registered.
//!
//! Every write through [`InvocationContext::set_value`] re-runs each
//! function whose most recent invocation read the written variable, with
//! that variable as the argument, whether or not the pair already completed.
//!
//! # Usage
//!
//! ```
//! use dynamo_application::{Engine, EngineConfig, registry::from_sync};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::in_memory(EngineConfig::default())?;
//!
//! engine.register_function(
//!     "blurple",
//!     from_sync(|variable, context| {
//!         if variable == "--blurple" {
//!             context.set_value("#7289DA");
//!         }
//!         Ok(None)
//!     }),
//! )?;
//!
//! engine.extract(".btn { color: var(--blurple) }");
//! engine.wait_idle().await;
//!
//! assert_eq!(engine.value_of("--blurple").as_deref(), Some("#7289DA"));
//! # Ok(())
//! # }
//! ```

mod context;
mod handle;
mod tracker;

use std::sync::Arc;

use dynamo_domain::{FunctionId, KnownVariables};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::config::EngineConfig;
use crate::error::{ApplicationError, ApplicationResult};
use crate::extractor::{StyleBatch, scan_variable_references};
use crate::ports::{StyleSource, ValueStore};
use crate::registry::{CssFunction, FunctionRegistry, RegisteredFunction};
use crate::store::InMemoryValueStore;

pub use context::InvocationContext;
pub use handle::FunctionHandle;
use tracker::TaskTracker;

/// The reactive variable engine.
///
/// Owns the known-variable set and the function registry. Dropping the
/// engine (or calling [`Engine::shutdown`]) tears it down; invocations
/// already running finish, but their writes are then refused.
pub struct Engine {
    inner: Arc<EngineInner>,
}

pub(crate) struct EngineInner {
    config: EngineConfig,
    pub(crate) store: Arc<dyn ValueStore>,
    pub(crate) registry: Mutex<FunctionRegistry>,
    variables: Mutex<KnownVariables>,
    runtime: Handle,
    tasks: TaskTracker,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.inner.config)
            .field("variables", &*self.inner.variables.lock())
            .field("functions", &self.inner.registry.lock().ids())
            .field("active_tasks", &self.inner.tasks.active())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Creates an engine writing into `store`.
    ///
    /// Work is spawned on the Tokio runtime this is called from.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NoRuntime` when called outside a Tokio runtime.
    pub fn new(store: Arc<dyn ValueStore>, config: EngineConfig) -> ApplicationResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|_| ApplicationError::NoRuntime)?;
        Ok(Self {
            inner: Arc::new(EngineInner {
                config,
                store,
                registry: Mutex::new(FunctionRegistry::new()),
                variables: Mutex::new(KnownVariables::new()),
                runtime,
                tasks: TaskTracker::default(),
            }),
        })
    }

    /// Creates an engine backed by a fresh [`InMemoryValueStore`].
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NoRuntime` when called outside a Tokio runtime.
    pub fn in_memory(config: EngineConfig) -> ApplicationResult<Self> {
        Self::new(Arc::new(InMemoryValueStore::new()), config)
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Returns the value store the engine writes into.
    #[must_use]
    pub fn store(&self) -> Arc<dyn ValueStore> {
        Arc::clone(&self.inner.store)
    }

    /// Registers `callback` under `id` and starts a pass so it catches up on
    /// every variable discovered so far.
    ///
    /// Registering an id again replaces the previous function and discards
    /// its bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if `id` is empty.
    pub fn register_function<F>(
        &self,
        id: impl Into<String>,
        callback: F,
    ) -> ApplicationResult<FunctionHandle>
    where
        F: CssFunction + 'static,
    {
        let id = FunctionId::parse(id).inspect_err(|e| {
            error!(error = %e, "Invalid function id");
        })?;

        let function = self.inner.registry.lock().insert(id, Box::new(callback));
        debug!(function = %function.id(), "Registered function");

        self.inner.spawn_pass();
        Ok(FunctionHandle::new(function, Arc::downgrade(&self.inner)))
    }

    /// Removes the function registered under `id`.
    ///
    /// Invocations already running are not cancelled. Returns false (and
    /// logs) when nothing is registered under `id`.
    pub fn unregister_function(&self, id: &str) -> bool {
        if id.is_empty() {
            error!("Invalid function id");
            return false;
        }
        if self.inner.registry.lock().remove(id).is_some() {
            debug!(function = id, "Unregistered function");
            true
        } else {
            error!(function = id, "Cannot find that function");
            false
        }
    }

    /// Discovers the variables referenced in `style` and returns the new ones.
    ///
    /// New names are placed ahead of the known ones. A pass starts if and
    /// only if something new was found.
    pub fn extract(&self, style: impl Into<StyleBatch>) -> Vec<String> {
        let batch = style.into();
        let references = scan_variable_references(&batch.joined());
        if references.is_empty() {
            return Vec::new();
        }

        let discovered = self.inner.variables.lock().absorb(references);
        if !discovered.is_empty() {
            debug!(count = discovered.len(), variables = ?discovered, "Discovered variables");
            self.inner.spawn_pass();
        }
        discovered
    }

    /// Collects a batch from `source` and extracts it.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Source` if the source cannot be read.
    pub async fn scan(&self, source: &dyn StyleSource) -> ApplicationResult<Vec<String>> {
        let batch = source.collect().await?;
        Ok(self.extract(batch))
    }

    /// Runs a full pass in the calling task and waits for it to finish.
    ///
    /// Work it triggers through writes is not awaited; see [`Engine::wait_idle`].
    pub async fn execute_all(&self) {
        self.inner.execute_all().await;
    }

    /// Resolves once no pass or invocation started by the engine is running.
    pub async fn wait_idle(&self) {
        self.inner.tasks.wait_idle().await;
    }

    /// Waits for outstanding work, then tears the engine down.
    pub async fn shutdown(self) {
        self.wait_idle().await;
        debug!("Engine shut down");
    }

    /// Known variables, newest discoveries first.
    #[must_use]
    pub fn known_variables(&self) -> Vec<String> {
        self.inner.variables.lock().to_vec()
    }

    /// Registered ids in invocation order.
    #[must_use]
    pub fn registered_ids(&self) -> Vec<FunctionId> {
        self.inner.registry.lock().ids()
    }

    /// Current resolved value of `name`.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<String> {
        self.inner.store.get(name)
    }
}

impl EngineInner {
    fn spawn_pass(self: &Arc<Self>) {
        let guard = self.tasks.enter();
        let engine = Arc::clone(self);
        self.runtime.spawn(async move {
            engine.execute_all().await;
            drop(engine);
            drop(guard);
        });
    }

    /// Invokes every pair that has neither completed nor an invocation in flight.
    async fn execute_all(self: &Arc<Self>) {
        let variables = self.variables.lock().to_vec();
        let functions = self.registry.lock().snapshot();
        trace!(variables = variables.len(), functions = functions.len(), "Starting pass");

        for variable in &variables {
            for function in &functions {
                let current = self.registry.lock().is_current(function);
                if !current || !function.try_begin_invocation(variable) {
                    continue;
                }
                let invocation = self.spawn_invocation(Arc::clone(function), variable.clone());
                if invocation.await.is_err() {
                    debug!(
                        function = %function.id(),
                        variable = %variable,
                        "Invocation supervisor aborted"
                    );
                }
            }
        }
    }

    /// Stores a value and re-runs the functions that read it.
    pub(crate) fn write(self: &Arc<Self>, variable: &str, value: String) {
        if self.config.skip_unchanged_writes
            && self.store.get(variable).as_deref() == Some(value.as_str())
        {
            trace!(variable, "Skipping unchanged write");
            return;
        }

        self.store.set(variable, &value);
        trace!(variable, value = %value, "Stored value");

        let dependents = self.registry.lock().dependents_of(variable);
        for function in dependents {
            debug!(function = %function.id(), variable, "Propagating change");
            function.begin_invocation(variable);
            drop(self.spawn_invocation(function, variable.to_string()));
        }
    }

    /// Spawns one invocation and returns a handle that resolves when it is over.
    ///
    /// The pair must already be in flight; it is released once the
    /// invocation ends, however it ends. The callback runs in its own task
    /// so that a panic stays confined to the pair being invoked.
    fn spawn_invocation(
        self: &Arc<Self>,
        function: Arc<RegisteredFunction>,
        variable: String,
    ) -> JoinHandle<()> {
        let guard = self.tasks.enter();
        let target = variable.clone();
        let context = InvocationContext::new(Arc::downgrade(self), Arc::clone(&function), variable);
        let apply_returned = self.config.apply_returned_values;

        let invoked = Arc::clone(&function);
        let task = self.runtime.spawn(async move {
            let variable = context.variable();
            invoked.reset_dependencies();
            match invoked.call(variable, &context).await {
                Ok(returned) => {
                    let returned = returned.filter(|value| apply_returned && !value.is_empty());
                    if let Some(value) = returned {
                        context.set_value(value);
                    }
                    invoked.mark_executed(variable);
                    trace!(function = %invoked.id(), variable, "Invocation completed");
                }
                Err(e) => {
                    warn!(function = %invoked.id(), variable, error = %e, "Function failed");
                }
            }
        });

        self.runtime.spawn(async move {
            let _guard = guard;
            let outcome = task.await;
            function.finish_invocation(&target);
            if let Err(e) = outcome
                && e.is_panic()
            {
                warn!(function = %function.id(), variable = %target, "Function panicked");
            }
        })
    }
}
