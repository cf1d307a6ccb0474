//! Concurrent bank loading.
//!
//! All bank files are fetched in parallel, joined, then normalized. A file
//! that fails to fetch or parse contributes zero questions; the failure is
//! logged and recorded in the load summary but never aborts the load.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::normalize::{normalize_bank, ValidationWarning};
use crate::model::Question;
use crate::traits::BankSource;

/// What happened to one bank file.
#[derive(Debug, Clone, PartialEq)]
pub struct BankOutcome {
    pub file: String,
    pub questions: usize,
    /// Fetch or parse failure, if any.
    pub error: Option<String>,
}

/// Every question loaded, in file order, plus per-file outcomes.
#[derive(Debug, Clone, Default)]
pub struct LoadedBanks {
    pub questions: Vec<Question>,
    pub outcomes: Vec<BankOutcome>,
    pub warnings: Vec<ValidationWarning>,
}

impl LoadedBanks {
    pub fn failed(&self) -> impl Iterator<Item = &BankOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }
}

/// Fetch and normalize `files` from `source`, at most `parallelism` at once.
pub async fn load_banks(
    source: Arc<dyn BankSource>,
    files: &[String],
    parallelism: usize,
) -> LoadedBanks {
    let start = Instant::now();
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut futures = FuturesUnordered::new();

    for (index, file) in files.iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let file = file.clone();

        futures.push(async move {
            let fetched = async {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
                let raw = source.fetch(&file).await?;
                let document: Value = serde_json::from_str(&raw)
                    .map_err(|e| anyhow::anyhow!("invalid JSON: {e}"))?;
                Ok::<_, anyhow::Error>(document)
            }
            .await;
            (index, file, fetched)
        });
    }

    let mut joined = Vec::with_capacity(files.len());
    while let Some(entry) = futures.next().await {
        joined.push(entry);
    }
    // Completion order is arbitrary; keep the caller's file order.
    joined.sort_by_key(|(index, _, _)| *index);

    let mut loaded = LoadedBanks::default();
    for (_, file, fetched) in joined {
        match fetched {
            Ok(document) => {
                let bank = normalize_bank(&document, &file);
                tracing::debug!("loaded {} questions from {file}", bank.questions.len());
                loaded.outcomes.push(BankOutcome {
                    file,
                    questions: bank.questions.len(),
                    error: None,
                });
                loaded.questions.extend(bank.questions);
                loaded.warnings.extend(bank.warnings);
            }
            Err(e) => {
                tracing::warn!("failed to load {file} from {}: {e:#}", source.name());
                loaded.outcomes.push(BankOutcome {
                    file,
                    questions: 0,
                    error: Some(format!("{e:#}")),
                });
            }
        }
    }

    tracing::info!(
        "loaded {} questions from {} banks in {:?}",
        loaded.questions.len(),
        files.len(),
        start.elapsed()
    );
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct StaticSource {
        files: HashMap<String, String>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl StaticSource {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BankSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, file: &str) -> anyhow::Result<String> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.files
                .get(file)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("HTTP 404"))
        }
    }

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn failures_contribute_zero_questions() {
        let source = Arc::new(StaticSource::new(&[
            ("polity.json", r#"[{"id": 1, "text": "Q1", "options": ["a", "b"], "correct": 1}]"#),
            ("broken.json", "{not json"),
            (
                "csat_math.json",
                r#"{"questions": [{"id": "m1", "question_text": "2+2?", "options": ["3", "4"], "correct_option_index": 1}]}"#,
            ),
        ]));

        let loaded = load_banks(
            source,
            &files(&["polity.json", "missing.json", "broken.json", "csat_math.json"]),
            4,
        )
        .await;

        assert_eq!(loaded.questions.len(), 2);
        assert_eq!(loaded.questions[0].id.as_str(), "1");
        assert_eq!(loaded.questions[1].paper, crate::model::Paper::Csat);
        let failed: Vec<_> = loaded.failed().map(|o| o.file.as_str()).collect();
        assert_eq!(failed, vec!["missing.json", "broken.json"]);
        assert!(loaded.outcomes[1].error.as_deref().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn parallelism_is_bounded() {
        let names: Vec<String> = (0..8).map(|i| format!("bank{i}.json")).collect();
        let entries: Vec<(String, String)> = names
            .iter()
            .map(|n| (n.clone(), "[]".to_string()))
            .collect();
        let borrowed: Vec<(&str, &str)> = entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let source = Arc::new(StaticSource::new(&borrowed));

        let loaded = load_banks(source.clone(), &names, 2).await;
        assert_eq!(loaded.outcomes.len(), 8);
        assert!(loaded.failed().next().is_none());
        assert!(source.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn validation_warnings_are_collected() {
        let source = Arc::new(StaticSource::new(&[(
            "economy.json",
            r#"[{"id": "e1", "text": "Repo rate?", "options": ["a"]}]"#,
        )]));
        let loaded = load_banks(source, &files(&["economy.json"]), 1).await;
        assert_eq!(loaded.questions.len(), 1);
        assert!(!loaded.warnings.is_empty());
        assert_eq!(loaded.warnings[0].source, "economy.json");
    }
}
