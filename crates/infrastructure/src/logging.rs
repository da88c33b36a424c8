//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set and valid.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
