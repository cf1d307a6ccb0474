//! prelims CLI: build quizzes from question banks, score attempts, and
//! track progress between sessions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "prelims", version, about = "UPSC prelims practice quizzes")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and a sample question bank
    Init,

    /// Load every bank in a directory and report validation warnings
    Validate {
        /// Directory of *.json banks (defaults to the configured data_dir)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Build a quiz and write it to a file
    Start {
        /// Paper: gs1 or csat
        #[arg(long, default_value = "gs1")]
        paper: String,

        /// Subject name, or "Mix" for every subject
        #[arg(long, default_value = "Mix")]
        subject: String,

        /// Topic name, or "All Topics"
        #[arg(long, default_value = "All Topics")]
        topic: String,

        /// Number of questions
        #[arg(long, default_value = "10")]
        count: usize,

        /// Mode: test or learning
        #[arg(long, default_value = "test")]
        mode: String,

        /// Total time limit in minutes
        #[arg(long)]
        time_limit: Option<u64>,

        /// Draw from the mistake bank instead of the question banks
        #[arg(long, conflicts_with = "mock")]
        mistakes: bool,

        /// Full-length mock paper
        #[arg(long)]
        mock: bool,

        /// Where to write the prepared quiz
        #[arg(long, default_value = "quiz.json")]
        output: PathBuf,
    },

    /// Score an attempt and record it
    Submit {
        /// Prepared quiz written by `prelims start`
        #[arg(long, default_value = "quiz.json")]
        quiz: PathBuf,

        /// Answers JSON: {"answers": {"<id>": <option index>}, "timeSpent": {...}}
        #[arg(long)]
        answers: PathBuf,
    },

    /// Show lifetime statistics
    Stats,

    /// Review the last attempt
    Review {
        /// Only show wrong answers
        #[arg(long)]
        wrong: bool,
    },

    /// Write stats reports
    Report {
        /// Comma-separated formats: html, md
        #[arg(long, default_value = "html")]
        format: String,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Write a backup of history and mistakes
    Export {
        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show or change preferences
    Settings {
        /// Colour theme: light or dark
        #[arg(long)]
        theme: Option<String>,

        /// Accept the content disclaimer
        #[arg(long)]
        accept_disclaimer: bool,
    },

    /// Delete attempt history (mistakes and settings are kept)
    ClearHistory {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Delete all local data
    Reset {
        /// Skip the confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prelims=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { data } => commands::validate::execute(data, config).await,
        Commands::Start {
            paper,
            subject,
            topic,
            count,
            mode,
            time_limit,
            mistakes,
            mock,
            output,
        } => {
            commands::start::execute(
                commands::start::StartArgs {
                    paper,
                    subject,
                    topic,
                    count,
                    mode,
                    time_limit,
                    mistakes,
                    mock,
                    output,
                },
                config,
            )
            .await
        }
        Commands::Submit { quiz, answers } => commands::submit::execute(quiz, answers, config),
        Commands::Stats => commands::stats::execute(config),
        Commands::Review { wrong } => commands::review::execute(wrong, config),
        Commands::Report { format, output } => commands::report::execute(format, output, config),
        Commands::Export { output } => commands::export::execute(output, config),
        Commands::Settings {
            theme,
            accept_disclaimer,
        } => commands::settings::execute(theme, accept_disclaimer, config),
        Commands::ClearHistory { yes } => commands::settings::clear_history(yes, config),
        Commands::Reset { yes } => commands::settings::reset(yes, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
