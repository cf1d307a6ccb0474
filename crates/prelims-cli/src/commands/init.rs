//! The `prelims init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("prelims.toml").exists() {
        println!("prelims.toml already exists, skipping.");
    } else {
        std::fs::write("prelims.toml", SAMPLE_CONFIG)?;
        println!("Created prelims.toml");
    }

    std::fs::create_dir_all("data")?;
    let bank_path = std::path::Path::new("data/polity.json");
    if bank_path.exists() {
        println!("data/polity.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created data/polity.json");
    }

    println!("\nNext steps:");
    println!("  1. Add more banks to data/ (one file per subject, e.g. economy.json)");
    println!("  2. Run: prelims validate");
    println!("  3. Run: prelims start --subject \"Indian Polity\" --count 3");
    println!("  4. Run: prelims submit --quiz quiz.json --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# prelims configuration

# Directory holding one JSON bank per subject.
data_dir = "./data"

# Serve banks from a static host instead ({base_url}/data/{file}).
# base_url = "https://example.org"

store_path = "./.prelims/store.json"
output_dir = "./prelims-reports"

# Attempts kept in history (0 keeps everything).
history_cap = 50
mistake_cap = 100
trend_window = 10
parallelism = 4
"#;

const SAMPLE_BANK: &str = r#"[
  {
    "id": 1,
    "subject": "Indian Polity",
    "topic": "Fundamental Rights",
    "year": 2021,
    "text": "Which Article of the Constitution guarantees protection of life and personal liberty?",
    "options": ["Article 14", "Article 19", "Article 21", "Article 32"],
    "correct": 2,
    "explanation": "Article 21 protects life and personal liberty."
  },
  {
    "id": 2,
    "subject": "Indian Polity",
    "topic": "Parliament",
    "text": "A Money Bill can be introduced only in:",
    "options": ["Rajya Sabha", "Lok Sabha", "Either House", "A joint sitting"],
    "correct": 1,
    "explanation": "Article 109: Money Bills originate only in the Lok Sabha."
  },
  {
    "id": 3,
    "subject": "Indian Polity",
    "topic": "Preamble",
    "text": "The words 'Socialist' and 'Secular' were added to the Preamble by which Amendment?",
    "options": ["24th", "42nd", "44th", "52nd"],
    "correct": 1,
    "explanation": "The 42nd Amendment Act, 1976."
  }
]
"#;
