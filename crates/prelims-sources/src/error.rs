//! Bank source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a bank file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The bank file does not exist at the source.
    #[error("bank file not found: {0}")]
    NotFound(String),

    /// The host answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Http { status: u16, url: String },

    /// The host could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// A local read failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
