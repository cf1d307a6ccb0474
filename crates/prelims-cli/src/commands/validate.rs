//! The `prelims validate` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use prelims_core::loader::load_banks;
use prelims_core::traits::BankSource;
use prelims_sources::dir::DirSource;
use prelims_sources::load_config_from;

pub async fn execute(data: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config_from(config_path)?;
    let data_dir = data.unwrap_or(config.data_dir);
    if !data_dir.is_dir() {
        anyhow::bail!("data directory not found: {}", data_dir.display());
    }

    let source: Arc<dyn BankSource> = Arc::new(DirSource::new(data_dir.clone()));
    let files = source.list().await?;
    if files.is_empty() {
        anyhow::bail!("no *.json banks in {}", data_dir.display());
    }

    let loaded = load_banks(source, &files, config.parallelism).await;

    for outcome in &loaded.outcomes {
        match &outcome.error {
            Some(error) => println!("Bank: {} FAILED: {error}", outcome.file),
            None => println!("Bank: {} ({} questions)", outcome.file, outcome.questions),
        }
        for w in loaded.warnings.iter().filter(|w| w.source == outcome.file) {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
    }

    let failures = loaded.failed().count();
    println!(
        "\n{} questions loaded from {} bank(s).",
        loaded.questions.len(),
        files.len()
    );
    if loaded.warnings.is_empty() && failures == 0 {
        println!("All banks valid.");
    } else {
        println!(
            "{} warning(s), {failures} failed bank(s).",
            loaded.warnings.len()
        );
    }

    Ok(())
}
