//! The `prelims report` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use prelims_report::html::write_html_report;
use prelims_report::markdown::write_markdown_report;
use prelims_report::StatsReport;

use super::open_state;

pub fn execute(format: String, output: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let (config, state) = open_state(config_path)?;
    let output = output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output)?;

    let report = StatsReport::from_state(&state, 0, Utc::now());

    for fmt in format.split(',').map(str::trim) {
        match fmt {
            "html" => {
                let path = output.join("stats.html");
                write_html_report(&report, &path)?;
                println!("HTML report: {}", path.display());
            }
            "md" | "markdown" => {
                let path = output.join("stats.md");
                write_markdown_report(&report, &path)?;
                println!("Markdown report: {}", path.display());
            }
            other => anyhow::bail!("unknown report format: {other} (expected html or md)"),
        }
    }

    Ok(())
}
