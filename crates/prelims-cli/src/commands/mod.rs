pub mod export;
pub mod init;
pub mod report;
pub mod review;
pub mod settings;
pub mod start;
pub mod stats;
pub mod submit;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use prelims_core::state::AppState;
use prelims_core::store::FileStore;
use prelims_sources::{load_config_from, PrelimsConfig};

/// Load configuration and open the local state it points at.
pub fn open_state(config_path: Option<&Path>) -> Result<(PrelimsConfig, AppState)> {
    let config = load_config_from(config_path)?;
    tracing::debug!("using store {}", config.store_path.display());
    let state = AppState::new(
        Box::new(FileStore::new(config.store_path.clone())),
        config.limits(),
    );
    Ok((config, state))
}
