//! Key-value persistence boundary.
//!
//! Everything the app remembers lives under a handful of string keys holding
//! JSON text, the same contract as browser local storage. Reads never fail:
//! a missing or unparsable value is replaced by the type's default.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Persisted keys.
pub mod keys {
    pub const HISTORY: &str = "history";
    pub const MISTAKES: &str = "mistakes";
    pub const LAST_RESULT: &str = "last_result";
    pub const QUIZ_CONFIG: &str = "quiz_config";
    pub const QUIZ_PROGRESS: &str = "quiz_progress";
    pub const THEME: &str = "theme";
    pub const DISCLAIMER_ACCEPTED: &str = "disclaimer_accepted";
    pub const STREAK: &str = "streak";
    pub const LAST_ACTIVE_DATE: &str = "last_active_date";
}

/// A string-keyed store of JSON text.
///
/// Writers read-modify-write whole values; concurrent writers resolve as
/// last-write-wins.
pub trait KeyValueStore: Send + Sync {
    /// Raw stored text, if any.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Replace the stored text.
    fn set_raw(&self, key: &str, value: String) -> Result<()>;

    /// Delete a key. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Delete every key.
    fn clear(&self) -> Result<()>;
}

/// Read and decode a value, substituting the default when it is missing or
/// corrupt.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    load(store, key).unwrap_or_default()
}

/// Read and decode a value. Corrupt values are logged and read as absent.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get_raw(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("stored value under '{key}' is corrupt, using default: {e}");
            None
        }
    }
}

/// Encode and write a value.
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("failed to serialize value for '{key}'"))?;
    store.set_raw(key, raw)
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: String) -> Result<()> {
        self.entries().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries().clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// A store persisted as one JSON object (`{ key: "json text" }`) on disk.
///
/// Every operation re-reads the file, so separate processes see each other's
/// writes; the last writer wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                tracing::warn!("failed to read store {}: {e}", self.path.display());
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(
                "store {} is corrupt, starting empty: {e}",
                self.path.display()
            );
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries).context("failed to serialize store")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write store to {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set_raw(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_all();
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.write_all(&BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        save(&store, keys::THEME, "dark").unwrap();
        let theme: Option<String> = load(&store, keys::THEME);
        assert_eq!(theme.as_deref(), Some("dark"));

        store.remove(keys::THEME).unwrap();
        assert!(store.get_raw(keys::THEME).is_none());
    }

    #[test]
    fn corrupt_value_reads_as_default() {
        let store = MemoryStore::new();
        store.set_raw(keys::HISTORY, "[{not json".into()).unwrap();
        let history: Vec<u32> = load_or_default(&store, keys::HISTORY);
        assert!(history.is_empty());
    }

    #[test]
    fn wrong_shape_reads_as_default() {
        let store = MemoryStore::new();
        store.set_raw(keys::MISTAKES, r#"{"a": 1}"#.into()).unwrap();
        let mistakes: Vec<String> = load_or_default(&store, keys::MISTAKES);
        assert!(mistakes.is_empty());
    }

    #[test]
    fn file_store_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let first = FileStore::new(&path);
        save(&first, keys::STREAK, &3u32).unwrap();
        save(&first, keys::THEME, "light").unwrap();

        let second = FileStore::new(&path);
        assert_eq!(load::<u32>(&second, keys::STREAK), Some(3));

        second.remove(keys::STREAK).unwrap();
        assert_eq!(load::<u32>(&first, keys::STREAK), None);
        assert_eq!(load::<String>(&first, keys::THEME).as_deref(), Some("light"));

        first.clear().unwrap();
        assert!(second.get_raw(keys::THEME).is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "this is not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get_raw(keys::HISTORY).is_none());
        save(&store, keys::THEME, "dark").unwrap();
        assert_eq!(load::<String>(&store, keys::THEME).as_deref(), Some("dark"));
    }
}
