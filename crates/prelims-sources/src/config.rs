//! Configuration loading and bank source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use prelims_core::catalog;
use prelims_core::state::Limits;
use prelims_core::traits::BankSource;

use crate::dir::DirSource;
use crate::http::HttpSource;

/// Top-level prelims configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrelimsConfig {
    /// Directory holding the `*.json` question banks.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Static host serving banks under `/data/`. Takes precedence over
    /// `data_dir` when set.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Local state file (history, mistakes, settings).
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Attempts kept in history; 0 keeps everything.
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
    #[serde(default = "default_mistake_cap")]
    pub mistake_cap: usize,
    /// Recent attempts shown on the accuracy trend.
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,
    /// Max concurrent bank fetches.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for reports and backups.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_store_path() -> PathBuf {
    PathBuf::from("./.prelims/store.json")
}
fn default_history_cap() -> usize {
    50
}
fn default_mistake_cap() -> usize {
    100
}
fn default_trend_window() -> usize {
    10
}
fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./prelims-reports")
}

impl Default for PrelimsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: None,
            store_path: default_store_path(),
            history_cap: default_history_cap(),
            mistake_cap: default_mistake_cap(),
            trend_window: default_trend_window(),
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
        }
    }
}

impl PrelimsConfig {
    pub fn limits(&self) -> Limits {
        Limits {
            history_cap: (self.history_cap > 0).then_some(self.history_cap),
            mistake_cap: self.mistake_cap,
            trend_window: self.trend_window,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `prelims.toml` in the current directory
/// 2. `~/.config/prelims/config.toml`
///
/// Environment variable overrides: `PRELIMS_DATA_DIR`, `PRELIMS_STORE`.
pub fn load_config() -> Result<PrelimsConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PrelimsConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("prelims.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PrelimsConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PrelimsConfig::default(),
    };

    if let Ok(dir) = std::env::var("PRELIMS_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(store) = std::env::var("PRELIMS_STORE") {
        config.store_path = PathBuf::from(store);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.store_path = resolve_path(&config.store_path);
    config.output_dir = resolve_path(&config.output_dir);
    config.base_url = config.base_url.as_deref().map(resolve_env_vars);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("prelims"))
}

/// Create the bank source the configuration points at.
pub fn create_source(config: &PrelimsConfig) -> Result<Arc<dyn BankSource>> {
    match config.base_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => Ok(Arc::new(HttpSource::new(url)?)),
        None => Ok(Arc::new(DirSource::new(config.data_dir.clone()))),
    }
}

/// Bank files to load: whatever the source lists, or the subject catalogue
/// when it cannot list (HTTP hosts).
pub async fn discover_bank_files(source: &dyn BankSource) -> Vec<String> {
    match source.list().await {
        Ok(files) if !files.is_empty() => files,
        Ok(_) => catalog::all_bank_files(),
        Err(e) => {
            tracing::warn!("cannot list {}: {e:#}; using the subject catalogue", source.name());
            catalog::all_bank_files()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_PRELIMS_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_PRELIMS_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_PRELIMS_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_PRELIMS_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = PrelimsConfig::default();
        assert_eq!(config.history_cap, 50);
        assert_eq!(config.mistake_cap, 100);
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.limits().history_cap, Some(50));
    }

    #[test]
    fn zero_history_cap_is_unbounded() {
        let config: PrelimsConfig = toml::from_str("history_cap = 0").unwrap();
        assert_eq!(config.limits().history_cap, None);
        assert_eq!(config.trend_window, 10);
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prelims.toml");
        std::fs::write(
            &path,
            r#"
data_dir = "${_PRELIMS_CFG_ROOT}/banks"
base_url = "https://example.org/upsc"
mistake_cap = 25
"#,
        )
        .unwrap();

        std::env::set_var("_PRELIMS_CFG_ROOT", "/srv");
        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_PRELIMS_CFG_ROOT");

        assert_eq!(config.data_dir, PathBuf::from("/srv/banks"));
        assert_eq!(config.base_url.as_deref(), Some("https://example.org/upsc"));
        assert_eq!(config.mistake_cap, 25);
        assert_eq!(config.history_cap, 50);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/prelims.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn factory_picks_http_when_base_url_is_set() {
        let config = PrelimsConfig {
            base_url: Some("http://localhost:8080".into()),
            ..PrelimsConfig::default()
        };
        assert_eq!(create_source(&config).unwrap().name(), "http://localhost:8080");

        let local = create_source(&PrelimsConfig::default()).unwrap();
        assert!(local.name().starts_with("dir:"));
    }

    #[tokio::test]
    async fn discovery_falls_back_to_catalogue() {
        let empty = MockSource::new();
        assert_eq!(discover_bank_files(&empty).await.len(), 15);

        let listed = MockSource::new().with_raw("custom.json", "[]");
        assert_eq!(discover_bank_files(&listed).await, vec!["custom.json"]);
    }
}
