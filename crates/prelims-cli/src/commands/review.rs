//! The `prelims review` command.

use std::path::Path;

use anyhow::Result;

use prelims_core::analysis::{format_duration, review, AnswerStatus, ReviewFilter, MAX_MARKS};

use super::open_state;

pub fn execute(wrong_only: bool, config_path: Option<&Path>) -> Result<()> {
    let (_, state) = open_state(config_path)?;
    let Some(result) = state.last_result() else {
        anyhow::bail!("no attempts recorded yet; run `prelims start` first");
    };

    println!(
        "Last attempt: {:.2} / {MAX_MARKS} | {}% accuracy | {} | {}",
        result.score,
        result.accuracy,
        format_duration(result.time_spent),
        result.timestamp.format("%Y-%m-%d %H:%M UTC")
    );

    let filter = if wrong_only {
        ReviewFilter::Wrong
    } else {
        ReviewFilter::All
    };
    let items = review(&result, filter);
    if items.is_empty() {
        println!("\nNothing to review.");
        return Ok(());
    }

    for (n, (status, answered)) in items.into_iter().enumerate() {
        let q = &answered.question;
        println!("\n{}. [{status}] {}", n + 1, q.text);
        for (i, option) in q.options.iter().enumerate() {
            let marker = if i == q.correct {
                "*"
            } else if answered.user_sel == Some(i) {
                "x"
            } else {
                " "
            };
            println!("  {marker} {i}) {option}");
        }
        if status == AnswerStatus::Skipped {
            println!("  (skipped)");
        }
        println!("  {}", q.explanation);
        if !q.linked_concepts.is_empty() {
            println!("  Related: {}", q.linked_concepts.join(", "));
        }
    }

    Ok(())
}
