//! Dynamo - Main Entry Point
//!
//! Resolves the custom properties referenced by the stylesheets given on
//! the command line and prints them as declarations.

use std::path::PathBuf;

use dynamo_infrastructure::{init_tracing, load_config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var_os("DYNAMO_CONFIG").map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    init_tracing(&config.log_filter)?;

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: dynamo <stylesheet.css | directory>...");
        return Ok(());
    }

    tracing::info!("Starting Dynamo v{}", env!("CARGO_PKG_VERSION"));

    for (name, value) in dynamo_host::run(&config, &paths).await? {
        println!("{name}: {value};");
    }

    Ok(())
}
