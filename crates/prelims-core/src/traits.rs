//! Source of raw question-bank documents.
//!
//! Implemented by the `prelims-sources` crate for local directories and
//! HTTP hosts.

use async_trait::async_trait;

/// Somewhere bank files can be fetched from, by file name.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Human-readable source name (e.g. "dir:data").
    fn name(&self) -> &str;

    /// Fetch the raw text of one bank file.
    async fn fetch(&self, file: &str) -> anyhow::Result<String>;

    /// Bank files this source can list, if it can list at all.
    async fn list(&self) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}
