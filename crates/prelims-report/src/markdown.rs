//! Markdown stats summary, suitable for pasting into notes.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use prelims_core::analysis::{format_duration, MAX_MARKS};
use prelims_core::statistics::{classify_subject, format_study_time, ranked_subjects};

use crate::snapshot::StatsReport;

fn list_or_placeholder(subjects: &[String]) -> String {
    if subjects.is_empty() {
        "No data yet".to_string()
    } else {
        subjects.join(", ")
    }
}

/// Generate a Markdown report.
pub fn generate_markdown(report: &StatsReport) -> String {
    let stats = &report.stats;
    let mut md = String::new();

    let _ = writeln!(md, "# Lifetime statistics\n");
    let _ = writeln!(
        md,
        "_Generated {}_\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    let _ = writeln!(md, "| Metric | Value |");
    let _ = writeln!(md, "|---|---|");
    let _ = writeln!(md, "| Accuracy | {}% |", stats.accuracy);
    let _ = writeln!(md, "| Questions | {} |", stats.total_questions);
    let _ = writeln!(md, "| Study time | {} |", format_study_time(stats.study_minutes));
    let _ = writeln!(md, "| Streak | {} days |", report.streak_days);
    let _ = writeln!(
        md,
        "| Syllabus | {}% ({} / {} Qs) |",
        report.syllabus.percent, report.syllabus.attempted, report.syllabus.available
    );

    let _ = writeln!(md, "\n## Strengths & weaknesses\n");
    let _ = writeln!(md, "- **Strong:** {}", list_or_placeholder(&report.swot.strong));
    let _ = writeln!(md, "- **Moderate:** {}", list_or_placeholder(&report.swot.moderate));
    let _ = writeln!(md, "- **Needs work:** {}", list_or_placeholder(&report.swot.weak));

    if !stats.accuracy_trend.is_empty() {
        let trend: Vec<String> = stats
            .accuracy_trend
            .iter()
            .map(|a| format!("{a}%"))
            .collect();
        let _ = writeln!(md, "\n## Accuracy trend\n\n{}", trend.join(" → "));
    }

    let _ = writeln!(md, "\n## Subjects\n");
    let ranked = ranked_subjects(&stats.subjects);
    if ranked.is_empty() {
        let _ = writeln!(md, "Take a quiz to see breakdown.");
    } else {
        let _ = writeln!(md, "| Subject | Questions | Correct | Accuracy | Standing |");
        let _ = writeln!(md, "|---|---:|---:|---:|---|");
        for (name, tally) in ranked {
            let standing = classify_subject(&tally)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                md,
                "| {} | {} | {} | {}% | {} |",
                name.replace('|', "\\|"),
                tally.questions_attempted,
                tally.correct_count,
                tally.accuracy(),
                standing
            );
        }
    }

    if let Some(result) = &report.last_result {
        let _ = writeln!(md, "\n## Last attempt\n");
        let _ = writeln!(
            md,
            "**{:.2} / {MAX_MARKS}** ({} paper, {}) | {}% accuracy | {} correct, {} wrong, {} skipped | {}",
            result.score,
            result.paper,
            result.subject.as_deref().unwrap_or("Mixed"),
            result.accuracy,
            result.correct,
            result.wrong,
            result.skipped,
            format_duration(result.time_spent)
        );
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &StatsReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
