//! The `prelims stats` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use prelims_core::statistics::{
    classify_subject, format_study_time, ranked_subjects, subject_progress, syllabus_progress,
};

use super::open_state;

fn list_or_placeholder(subjects: &[String]) -> String {
    if subjects.is_empty() {
        "-".to_string()
    } else {
        subjects.join(", ")
    }
}

pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let (_, state) = open_state(config_path)?;
    let history = state.history();
    let stats = state.stats();
    let syllabus = syllabus_progress(&history, 0);

    let mut table = Table::new();
    table.set_header(vec!["Accuracy", "Questions", "Study time", "Streak", "Syllabus"]);
    table.add_row(vec![
        Cell::new(format!("{}%", stats.accuracy)),
        Cell::new(stats.total_questions),
        Cell::new(format_study_time(stats.study_minutes)),
        Cell::new(format!("{} days", state.streak().days)),
        Cell::new(format!(
            "{}% ({} / {})",
            syllabus.percent, syllabus.attempted, syllabus.available
        )),
    ]);
    println!("{table}");

    let ranked = ranked_subjects(&stats.subjects);
    if ranked.is_empty() {
        println!("\nNo attempts yet. Take a quiz to see the subject breakdown.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Questions", "Correct", "Accuracy", "Standing", "Covered"]);
    for (name, tally) in ranked {
        let standing = classify_subject(&tally)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let covered = subject_progress(&history, name);
        table.add_row(vec![
            Cell::new(name),
            Cell::new(tally.questions_attempted),
            Cell::new(tally.correct_count),
            Cell::new(format!("{}%", tally.accuracy())),
            Cell::new(standing),
            Cell::new(format!("{}%", covered.percent)),
        ]);
    }
    println!("{table}");

    let swot = state.swot();
    println!("\nStrong:     {}", list_or_placeholder(&swot.strong));
    println!("Moderate:   {}", list_or_placeholder(&swot.moderate));
    println!("Needs work: {}", list_or_placeholder(&swot.weak));

    if !stats.accuracy_trend.is_empty() {
        let trend: Vec<String> = stats
            .accuracy_trend
            .iter()
            .map(|a| format!("{a}%"))
            .collect();
        println!("Trend:      {}", trend.join(" -> "));
    }

    Ok(())
}
