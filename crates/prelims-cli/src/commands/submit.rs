//! The `prelims submit` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::{Cell, Table};
use serde_json::Value;

use prelims_core::analysis::{average_seconds, format_duration, subject_accuracy, MAX_MARKS};
use prelims_core::model::{Answers, QuizResult};
use prelims_core::session::{PreparedQuiz, QuizProgress, QuizSession};

use super::open_state;

/// Accept either the autosave shape (`{"answers": {...}, "timeSpent": {...}}`)
/// or a bare `{"<id>": <option>}` map.
fn parse_answers(content: &str) -> Result<QuizProgress> {
    let value: Value = serde_json::from_str(content).context("answers file is not valid JSON")?;
    if value.get("answers").is_some() {
        serde_json::from_value(value).context("failed to parse answers")
    } else {
        let answers: Answers = serde_json::from_value(value).context("failed to parse answers")?;
        Ok(QuizProgress {
            answers,
            ..QuizProgress::default()
        })
    }
}

pub fn execute(quiz_path: PathBuf, answers_path: PathBuf, config_path: Option<&Path>) -> Result<()> {
    let content = std::fs::read_to_string(&quiz_path)
        .with_context(|| format!("failed to read quiz from {}", quiz_path.display()))?;
    let prepared: PreparedQuiz = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse quiz: {}", quiz_path.display()))?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers from {}", answers_path.display()))?;
    let progress = parse_answers(&content)?;

    let ignored = progress
        .answers
        .keys()
        .filter(|id| !prepared.questions.iter().any(|q| &q.id == *id))
        .count();
    if ignored > 0 {
        tracing::warn!("ignoring {ignored} answer(s) for questions not in this quiz");
    }

    let session = QuizSession::resume(prepared.config, prepared.questions, progress)?;
    let submission = session.submit(Utc::now());

    let (_, state) = open_state(config_path)?;
    state.record_submission(&submission)?;

    print_scorecard(&submission.result);
    if !submission.mistakes.is_empty() {
        println!(
            "\n{} question(s) added to review. Practise them with: prelims start --mistakes",
            submission.mistakes.len()
        );
    }
    Ok(())
}

fn print_scorecard(result: &QuizResult) {
    println!("\nScore: {:.2} / {MAX_MARKS} ({} paper)\n", result.score, result.paper);

    let mut table = Table::new();
    table.set_header(vec![
        "Accuracy",
        "Correct",
        "Wrong",
        "Skipped",
        "Time",
        "Avg / question",
    ]);
    table.add_row(vec![
        Cell::new(format!("{}%", result.accuracy)),
        Cell::new(result.correct),
        Cell::new(result.wrong),
        Cell::new(result.skipped),
        Cell::new(format_duration(result.time_spent)),
        Cell::new(format_duration(average_seconds(result))),
    ]);
    println!("{table}");

    let subjects = subject_accuracy(result);
    if subjects.len() > 1 {
        let mut table = Table::new();
        table.set_header(vec!["Subject", "Accuracy"]);
        for (subject, accuracy) in subjects {
            table.add_row(vec![Cell::new(subject), Cell::new(format!("{accuracy}%"))]);
        }
        println!("{table}");
    }
}
