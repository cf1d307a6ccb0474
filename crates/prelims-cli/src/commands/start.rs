//! The `prelims start` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use prelims_core::catalog;
use prelims_core::loader::load_banks;
use prelims_core::model::Paper;
use prelims_core::session::{
    format_time, select_questions, PreparedQuiz, QuickType, QuizConfig, QuizMode, QuizProgress,
    MIX_SUBJECT,
};
use prelims_sources::{create_source, discover_bank_files};

use super::open_state;

pub struct StartArgs {
    pub paper: String,
    pub subject: String,
    pub topic: String,
    pub count: usize,
    pub mode: String,
    pub time_limit: Option<u64>,
    pub mistakes: bool,
    pub mock: bool,
    pub output: PathBuf,
}

fn parse_mode(mode: &str) -> Result<QuizMode> {
    match mode.trim().to_lowercase().as_str() {
        "test" => Ok(QuizMode::Test),
        "learning" | "learn" => Ok(QuizMode::Learning),
        other => anyhow::bail!("unknown mode: {other} (expected test or learning)"),
    }
}

fn build_config(args: &StartArgs) -> Result<QuizConfig> {
    let paper: Paper = args.paper.parse().map_err(anyhow::Error::msg)?;
    let mode = parse_mode(&args.mode)?;
    anyhow::ensure!(args.count > 0, "--count must be at least 1");

    let mut config = if args.mistakes {
        QuizConfig {
            count: args.count,
            ..QuizConfig::quick(QuickType::Mistakes, paper, mode)
        }
    } else if args.mock {
        QuizConfig::mock(paper, mode)
    } else {
        QuizConfig {
            mode,
            paper,
            subject: args.subject.clone(),
            topic: args.topic.clone(),
            count: args.count,
            ..QuizConfig::default()
        }
    };
    if let Some(minutes) = args.time_limit {
        config.time_limit = Some(minutes * 60);
    }
    Ok(config)
}

pub async fn execute(args: StartArgs, config_path: Option<&Path>) -> Result<()> {
    let quiz_config = build_config(&args)?;
    let (config, state) = open_state(config_path)?;

    let pool = if quiz_config.quick_type == Some(QuickType::Mistakes) {
        Vec::new()
    } else {
        let source = create_source(&config)?;
        let files = match catalog::file_for_subject(&quiz_config.subject) {
            Some(file) if quiz_config.subject != MIX_SUBJECT => vec![file],
            _ => discover_bank_files(source.as_ref()).await,
        };
        let loaded = load_banks(source, &files, config.parallelism).await;
        for failed in loaded.failed() {
            eprintln!(
                "Warning: could not load {}: {}",
                failed.file,
                failed.error.as_deref().unwrap_or("unknown error")
            );
        }
        loaded.questions
    };

    let mistakes = state.mistakes();
    let questions = select_questions(&quiz_config, &pool, &mistakes, &mut rand::rng())
        .map_err(|e| {
            if e.needs_reconfiguration() {
                anyhow::anyhow!("{e}; try a different paper, subject or topic")
            } else {
                anyhow::Error::new(e)
            }
        })?;

    let prepared = PreparedQuiz {
        config: quiz_config.clone(),
        questions,
    };
    let json = serde_json::to_string_pretty(&prepared).context("failed to serialize quiz")?;
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&args.output, json)
        .with_context(|| format!("failed to write quiz to {}", args.output.display()))?;

    state.save_quiz_config(&quiz_config)?;
    state.save_progress(&QuizProgress::default())?;

    if !state.disclaimer_accepted() {
        eprintln!(
            "Note: questions and answer keys are community-sourced and may contain errors. \
             Run `prelims settings --accept-disclaimer` to hide this notice."
        );
    }

    print_quiz(&prepared);
    println!(
        "\nWrote {} question(s) to {}",
        prepared.questions.len(),
        args.output.display()
    );
    println!(
        "Answer with: prelims submit --quiz {} --answers answers.json",
        args.output.display()
    );
    Ok(())
}

fn print_quiz(prepared: &PreparedQuiz) {
    let config = &prepared.config;
    let source = match config.quick_type {
        Some(QuickType::Mistakes) => "mistake bank".to_string(),
        _ => format!("{} / {} / {}", config.paper, config.subject, config.topic),
    };
    match config.mode {
        QuizMode::Test => println!(
            "Test: {source} ({} questions, {} allowed)\n",
            prepared.questions.len(),
            format_time(config.effective_time_limit())
        ),
        QuizMode::Learning => println!(
            "Learning: {source} ({} questions, untimed)\n",
            prepared.questions.len()
        ),
    }

    for (n, question) in prepared.questions.iter().enumerate() {
        if let Some(passage) = &question.parent_text {
            println!("{passage}\n");
        }
        println!("Q{}. [{}] {}", n + 1, question.id, question.text);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {i}) {option}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> StartArgs {
        StartArgs {
            paper: "gs1".into(),
            subject: "Indian Polity".into(),
            topic: "All Topics".into(),
            count: 5,
            mode: "test".into(),
            time_limit: None,
            mistakes: false,
            mock: false,
            output: PathBuf::from("quiz.json"),
        }
    }

    #[test]
    fn builds_a_filtered_config() {
        let config = build_config(&args()).unwrap();
        assert_eq!(config.subject, "Indian Polity");
        assert_eq!(config.count, 5);
        assert_eq!(config.effective_time_limit(), 5 * 72);
    }

    #[test]
    fn mock_and_mistakes_override_filters() {
        let mock = build_config(&StartArgs {
            mock: true,
            paper: "csat".into(),
            ..args()
        })
        .unwrap();
        assert_eq!(mock.count, 80);
        assert_eq!(mock.paper, Paper::Csat);

        let review = build_config(&StartArgs {
            mistakes: true,
            time_limit: Some(3),
            ..args()
        })
        .unwrap();
        assert_eq!(review.quick_type, Some(QuickType::Mistakes));
        assert_eq!(review.time_limit, Some(180));
        assert_eq!(review.paper, Paper::Gs1);

        let csat_review = build_config(&StartArgs {
            mistakes: true,
            paper: "csat".into(),
            ..args()
        })
        .unwrap();
        assert_eq!(csat_review.paper, Paper::Csat);
        assert_eq!(csat_review.effective_time_limit(), 5 * 90);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(build_config(&StartArgs {
            mode: "exam".into(),
            ..args()
        })
        .is_err());
        assert!(build_config(&StartArgs {
            paper: "gs9".into(),
            ..args()
        })
        .is_err());
    }
}
