//! Compute function contract.
//!
//! Every callback, synchronous or not, is driven through the same async
//! [`CssFunction::compute`] call.

use std::future::Future;

use async_trait::async_trait;

use crate::engine::InvocationContext;
use crate::error::CallbackResult;

/// A user-supplied function computing values for custom properties.
#[async_trait]
pub trait CssFunction: Send + Sync {
    /// Runs the function for `variable`.
    ///
    /// Values are written through `context.set_value`, other variables are
    /// read through `context.get_variable`. Returning `Ok(Some(value))` is
    /// a shorthand for writing `value`; an empty `value` is ignored.
    ///
    /// # Errors
    /// Any error leaves the variable eligible for a later retry.
    async fn compute(&self, variable: &str, context: &InvocationContext) -> CallbackResult;
}

/// Adapter for plain closures.
pub struct SyncFunction<F>(F);

#[async_trait]
impl<F> CssFunction for SyncFunction<F>
where
    F: Fn(&str, &InvocationContext) -> CallbackResult + Send + Sync,
{
    async fn compute(&self, variable: &str, context: &InvocationContext) -> CallbackResult {
        (self.0)(variable, context)
    }
}

/// Adapter for closures returning a future.
pub struct AsyncFunction<F>(F);

#[async_trait]
impl<F, Fut> CssFunction for AsyncFunction<F>
where
    F: Fn(String, InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = CallbackResult> + Send + 'static,
{
    async fn compute(&self, variable: &str, context: &InvocationContext) -> CallbackResult {
        (self.0)(variable.to_string(), context.clone()).await
    }
}

/// Wraps a synchronous closure as a [`CssFunction`].
///
/// # Examples
///
/// ```
/// use dynamo_application::registry::from_sync;
///
/// let blurple = from_sync(|variable, context| {
///     if variable == "--blurple" {
///         context.set_value("#7289DA");
///     }
///     Ok(None)
/// });
/// # let _ = blurple;
/// ```
pub const fn from_sync<F>(f: F) -> SyncFunction<F>
where
    F: Fn(&str, &InvocationContext) -> CallbackResult + Send + Sync,
{
    SyncFunction(f)
}

/// Wraps a closure returning a future as a [`CssFunction`].
pub const fn from_async<F, Fut>(f: F) -> AsyncFunction<F>
where
    F: Fn(String, InvocationContext) -> Fut + Send + Sync,
    Fut: Future<Output = CallbackResult> + Send + 'static,
{
    AsyncFunction(f)
}
