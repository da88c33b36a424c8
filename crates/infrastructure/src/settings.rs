//! Settings loading
//!
//! Layers, later ones winning:
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `DYNAMO__`-prefixed environment variables, `__` separating sections
//!    (e.g. `DYNAMO__ENGINE__SKIP_UNCHANGED_WRITES=true`)

use std::path::Path;

use config::{Config, Environment, File, Map};
use dynamo_application::EngineConfig;
use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DYNAMO";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Engine tunables.
    pub engine: EngineConfig,

    /// Default tracing filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// Loads configuration from defaults, `file` (if given) and the process environment.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or a value has the wrong type.
pub fn load_config(file: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with_env(file, None)
}

/// Like [`load_config`], reading environment variables from `env` instead
/// of the process environment when it is given.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or a value has the wrong type.
pub fn load_config_with_env(
    file: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();
    if let Some(path) = file {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
