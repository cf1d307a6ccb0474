//! prelims-sources: where question banks come from.
//!
//! Implements the `BankSource` trait for a local data directory and for a
//! static HTTP host, and loads the `prelims.toml` configuration that picks
//! between them.

pub mod config;
pub mod dir;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{create_source, discover_bank_files, load_config, load_config_from, PrelimsConfig};
pub use error::SourceError;
