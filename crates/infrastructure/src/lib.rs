//! Dynamo Infrastructure - Adapters and host plumbing
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration and logging setup.

pub mod logging;
pub mod settings;
pub mod sources;

pub use logging::init_tracing;
pub use settings::{AppConfig, ConfigError, load_config, load_config_with_env};
pub use sources::{FeedClosed, FileStyleSource, StyleFeed};
