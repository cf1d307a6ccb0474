//! Banks read from a local data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use prelims_core::traits::BankSource;

use crate::error::SourceError;

/// Reads `{dir}/{file}` from disk.
pub struct DirSource {
    dir: PathBuf,
    name: String,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let name = format!("dir:{}", dir.display());
        Self { dir, name }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl BankSource for DirSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, file: &str) -> anyhow::Result<String> {
        let path = self.dir.join(file);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.display().to_string()).into())
            }
            Err(source) => Err(SourceError::Io { path, source }.into()),
        }
    }

    /// Every `*.json` file in the directory, sorted by name.
    async fn list(&self) -> anyhow::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|source| SourceError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}
