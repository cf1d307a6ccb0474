//! HTML stats report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined and charts drawn
//! as inline SVG.

use anyhow::{Context, Result};
use std::path::Path;

use prelims_core::analysis::{
    average_seconds, format_duration, review, subject_accuracy, ReviewFilter, MAX_MARKS,
};
use prelims_core::model::QuizResult;
use prelims_core::statistics::{format_study_time, ranked_subjects, Standing};

use crate::snapshot::StatsReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn standing_class(accuracy: u32) -> &'static str {
    match Standing::from_accuracy(accuracy) {
        Standing::Strong => "strong",
        Standing::Moderate => "moderate",
        Standing::Weak => "weak",
    }
}

/// Generate an HTML report.
pub fn generate_html(report: &StatsReport) -> String {
    let stats = &report.stats;
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>prelims stats</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Lifetime statistics</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Generated {} | {}-day streak</p>\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.streak_days
    ));
    html.push_str("</header>\n");

    // Hero numbers
    html.push_str("<section class=\"hero\">\n");
    for (label, value) in [
        ("Accuracy", format!("{}%", stats.accuracy)),
        ("Questions", stats.total_questions.to_string()),
        ("Study time", format_study_time(stats.study_minutes)),
        (
            "Syllabus",
            format!(
                "{}% ({} / {} Qs)",
                report.syllabus.percent, report.syllabus.attempted, report.syllabus.available
            ),
        ),
    ] {
        html.push_str(&format!(
            "<div class=\"tile\"><span class=\"label\">{label}</span><span class=\"value\">{}</span></div>\n",
            html_escape(&value)
        ));
    }
    html.push_str("</section>\n");

    // Strengths and weaknesses
    html.push_str("<section class=\"swot\">\n<h2>Strengths &amp; weaknesses</h2>\n<ul>\n");
    for (class, label, subjects) in [
        ("strong", "Strong", &report.swot.strong),
        ("moderate", "Moderate", &report.swot.moderate),
        ("weak", "Needs work", &report.swot.weak),
    ] {
        let list = if subjects.is_empty() {
            "No data yet".to_string()
        } else {
            subjects
                .iter()
                .map(|s| html_escape(s))
                .collect::<Vec<_>>()
                .join(", ")
        };
        html.push_str(&format!(
            "<li class=\"{class}\"><strong>{label}:</strong> {list}</li>\n"
        ));
    }
    html.push_str("</ul>\n</section>\n");

    // Accuracy trend
    html.push_str("<section class=\"trend\">\n<h2>Accuracy trend</h2>\n");
    html.push_str(&generate_trend_chart(&stats.accuracy_trend));
    html.push_str("</section>\n");

    // Subjects
    html.push_str("<section class=\"subjects\">\n<h2>Subjects</h2>\n");
    let ranked = ranked_subjects(&stats.subjects);
    if ranked.is_empty() {
        html.push_str("<p class=\"meta\">Take a quiz to see breakdown.</p>\n");
    } else {
        let bars: Vec<(String, u32)> = ranked
            .iter()
            .map(|(name, tally)| (name.to_string(), tally.accuracy()))
            .collect();
        html.push_str(&generate_bar_chart(&bars));

        html.push_str("<table>\n<thead><tr><th>Subject</th><th>Questions</th><th>Correct</th><th>Accuracy</th></tr></thead>\n<tbody>\n");
        for (name, tally) in &ranked {
            let accuracy = tally.accuracy();
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}%</td></tr>\n",
                html_escape(name),
                tally.questions_attempted,
                tally.correct_count,
                standing_class(accuracy),
                accuracy
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    if let Some(result) = &report.last_result {
        html.push_str(&generate_last_attempt(result));
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &StatsReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn generate_last_attempt(result: &QuizResult) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"last-attempt\">\n<h2>Last attempt</h2>\n");
    html.push_str(&format!(
        "<p><span class=\"score\">{:.2}</span> / {MAX_MARKS} | {}% accuracy | {} correct, {} wrong, {} skipped | {} ({}s per question)</p>\n",
        result.score,
        result.accuracy,
        result.correct,
        result.wrong,
        result.skipped,
        format_duration(result.time_spent),
        average_seconds(result),
    ));

    let per_subject = subject_accuracy(result);
    if !per_subject.is_empty() {
        html.push_str(&generate_bar_chart(&per_subject));
    }

    let wrong = review(result, ReviewFilter::Wrong);
    if !wrong.is_empty() {
        html.push_str("<h3>Review mistakes</h3>\n<ol class=\"review\">\n");
        for (_, answered) in wrong {
            let q = &answered.question;
            let chosen = answered
                .user_sel
                .and_then(|i| q.options.get(i))
                .map(String::as_str)
                .unwrap_or("-");
            let answer = q.options.get(q.correct).map(String::as_str).unwrap_or("-");
            html.push_str(&format!(
                "<li><p>{}</p><p class=\"weak\">Your answer: {}</p><p class=\"strong\">Correct: {}</p><p class=\"meta\">{}</p></li>\n",
                html_escape(&q.text),
                html_escape(chosen),
                html_escape(answer),
                html_escape(&q.explanation),
            ));
        }
        html.push_str("</ol>\n");
    }
    html.push_str("</section>\n");
    html
}

/// Line chart of per-attempt accuracy, oldest on the left.
fn generate_trend_chart(trend: &[u32]) -> String {
    let width = 600usize;
    let height = 200usize;
    let padding = 20usize;

    let points: Vec<u32> = if trend.is_empty() { vec![0] } else { trend.to_vec() };
    let step = if points.len() > 1 {
        (width - 2 * padding) as f64 / (points.len() - 1) as f64
    } else {
        0.0
    };
    let y_for = |acc: u32| {
        let usable = (height - 2 * padding) as f64;
        padding as f64 + usable * (1.0 - acc.min(100) as f64 / 100.0)
    };

    let coords: Vec<String> = points
        .iter()
        .enumerate()
        .map(|(i, &acc)| format!("{:.1},{:.1}", padding as f64 + step * i as f64, y_for(acc)))
        .collect();

    let mut svg = format!(
        "<svg width=\"{width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );
    svg.push_str(&format!(
        "  <polyline fill=\"none\" stroke=\"#2563eb\" stroke-width=\"3\" points=\"{}\"/>\n",
        coords.join(" ")
    ));
    for (coord, acc) in coords.iter().zip(&points) {
        let (x, y) = coord.split_once(',').unwrap_or(("0", "0"));
        svg.push_str(&format!(
            "  <circle cx=\"{x}\" cy=\"{y}\" r=\"4\" fill=\"#fff\" stroke=\"#2563eb\" stroke-width=\"2\"><title>{acc}%</title></circle>\n"
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

fn generate_bar_chart(bars: &[(String, u32)]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = bars.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, accuracy)) in bars.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (*accuracy).min(100) as usize * max_width / 100;

        let color = match Standing::from_accuracy(*accuracy) {
            Standing::Strong => "#10b981",
            Standing::Moderate => "#f59e0b",
            Standing::Weak => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            accuracy
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1e293b; --muted: #64748b; --border: #e2e8f0; --strong: #059669; --moderate: #d97706; --weak: #dc2626; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #0f172a; --fg: #f1f5f9; --muted: #94a3b8; --border: #334155; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: var(--muted); }
.hero { display: flex; flex-wrap: wrap; gap: 1rem; }
.tile { border: 1px solid var(--border); border-radius: 12px; padding: 1rem 1.5rem; display: flex; flex-direction: column; }
.tile .label { color: var(--muted); font-size: 0.8rem; text-transform: uppercase; }
.tile .value { font-size: 1.5rem; font-weight: bold; }
.score { font-size: 1.5rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.strong { color: var(--strong); }
.moderate { color: var(--moderate); }
.weak { color: var(--weak); }
.review li { margin-bottom: 1rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;
