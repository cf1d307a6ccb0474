//! The `prelims export` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use super::open_state;

pub fn execute(output: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let (config, state) = open_state(config_path)?;
    let output = output.unwrap_or(config.output_dir);

    let backup = state.export(Utc::now());
    let path = output.join(backup.default_file_name());
    backup.save_json(&path)?;

    println!(
        "Exported {} attempt(s) and {} mistake(s) to {}",
        backup.history.len(),
        backup.mistakes.len(),
        path.display()
    );
    Ok(())
}
