//! Preferences and destructive data actions.

use std::path::Path;

use anyhow::Result;

use prelims_core::state::{THEME_DARK, THEME_LIGHT};

use super::open_state;

pub fn execute(theme: Option<String>, accept_disclaimer: bool, config_path: Option<&Path>) -> Result<()> {
    let (config, state) = open_state(config_path)?;

    if let Some(theme) = theme {
        let theme = theme.trim().to_lowercase();
        if theme != THEME_LIGHT && theme != THEME_DARK {
            anyhow::bail!("unknown theme: {theme} (expected light or dark)");
        }
        state.set_theme(&theme)?;
    }
    if accept_disclaimer {
        state.accept_disclaimer()?;
    }

    println!("Store:      {}", config.store_path.display());
    println!("Theme:      {}", state.theme());
    println!(
        "Disclaimer: {}",
        if state.disclaimer_accepted() {
            "accepted"
        } else {
            "not accepted"
        }
    );
    println!(
        "Saved:      {} attempt(s), {} mistake(s)",
        state.history().len(),
        state.mistakes().len()
    );
    Ok(())
}

pub fn clear_history(yes: bool, config_path: Option<&Path>) -> Result<()> {
    if !yes {
        println!("This deletes every recorded attempt. Re-run with --yes to confirm.");
        return Ok(());
    }
    let (_, state) = open_state(config_path)?;
    state.clear_history()?;
    println!("History cleared.");
    Ok(())
}

pub fn reset(yes: bool, config_path: Option<&Path>) -> Result<()> {
    if !yes {
        println!("This deletes history, mistakes and settings. Re-run with --yes to confirm.");
        return Ok(());
    }
    let (_, state) = open_state(config_path)?;
    state.factory_reset()?;
    println!("All local data cleared.");
    Ok(())
}
