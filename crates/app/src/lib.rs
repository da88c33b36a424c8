//! Dynamo - host wiring for the CSS variable engine
//!
//! Builds an engine from [`AppConfig`], registers the demo functions and
//! resolves the variables referenced by a set of stylesheets.

pub mod functions;

use std::path::PathBuf;

use dynamo_application::{ApplicationResult, Engine};
use dynamo_infrastructure::{AppConfig, FileStyleSource};
use tracing::info;

/// Scans `paths`, waits for every resulting invocation and returns the
/// resolved values in first-write order.
///
/// # Errors
///
/// Fails outside a Tokio runtime or when a path cannot be read.
pub async fn run(
    config: &AppConfig,
    paths: &[PathBuf],
) -> ApplicationResult<Vec<(String, String)>> {
    let engine = Engine::in_memory(config.engine)?;
    functions::register_defaults(&engine)?;

    let source = FileStyleSource::new(paths.iter().cloned());
    let discovered = engine.scan(&source).await?;
    info!(count = discovered.len(), "Discovered variables");

    engine.wait_idle().await;
    let values = engine.store().snapshot();
    engine.shutdown().await;
    Ok(values)
}
