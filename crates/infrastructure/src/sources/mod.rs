//! Style source adapters
//!
//! Stand-ins for the host environment: they turn stylesheets into the raw
//! rule text the engine scans for variable references.

mod feed;
mod file;

pub use feed::{FeedClosed, StyleFeed};
pub use file::FileStyleSource;
