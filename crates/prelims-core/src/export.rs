//! Backup export of history and the mistake bank.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuizResult};

/// A point-in-time dump of the user's local data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub date: DateTime<Utc>,
    pub history: Vec<QuizResult>,
    pub mistakes: Vec<Question>,
}

impl BackupDocument {
    pub fn new(date: DateTime<Utc>, history: Vec<QuizResult>, mistakes: Vec<Question>) -> Self {
        Self {
            date,
            history,
            mistakes,
        }
    }

    /// `upsc-backup-YYYY-MM-DD.json` for the backup date.
    pub fn default_file_name(&self) -> String {
        format!("upsc-backup-{}.json", self.date.format("%Y-%m-%d"))
    }

    /// Write the backup as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize backup")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write backup to {}", path.display()))?;
        Ok(())
    }

    /// Load a backup for inspection.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read backup from {}", path.display()))?;
        let backup: BackupDocument =
            serde_json::from_str(&content).context("failed to parse backup JSON")?;
        Ok(backup)
    }
}
