//! Mock bank source for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use prelims_core::traits::BankSource;

use crate::error::SourceError;

/// An in-memory source that serves fixed documents by file name.
///
/// Files registered with [`MockSource::with_failure`] always error.
#[derive(Default)]
pub struct MockSource {
    files: BTreeMap<String, Result<String, u16>>,
    call_count: AtomicU32,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` under `file`.
    pub fn with_bank(mut self, file: &str, document: &Value) -> Self {
        self.files.insert(file.to_string(), Ok(document.to_string()));
        self
    }

    /// Serve raw, possibly malformed, text under `file`.
    pub fn with_raw(mut self, file: &str, text: &str) -> Self {
        self.files.insert(file.to_string(), Ok(text.to_string()));
        self
    }

    /// Answer `file` with an HTTP-style failure status.
    pub fn with_failure(mut self, file: &str, status: u16) -> Self {
        self.files.insert(file.to_string(), Err(status));
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BankSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, file: &str) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match self.files.get(file) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(status)) => Err(SourceError::Http {
                status: *status,
                url: format!("mock://data/{file}"),
            }
            .into()),
            None => Err(SourceError::NotFound(file.to_string()).into()),
        }
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use prelims_core::loader::load_banks;
    use serde_json::json;

    #[tokio::test]
    async fn serves_registered_banks() {
        let source = MockSource::new().with_bank("polity.json", &json!([]));
        assert_eq!(source.fetch("polity.json").await.unwrap(), "[]");
        assert!(source.fetch("economy.json").await.is_err());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn loader_skips_failed_banks() {
        let source = Arc::new(
            MockSource::new()
                .with_bank(
                    "polity.json",
                    &json!([
                        {"id": 1, "subject": "Indian Polity", "text": "Article 21?", "options": ["Life", "Speech"], "correct": 0},
                        {"id": 2, "subject": "Indian Polity", "text": "Article 19?", "options": ["Life", "Speech"], "correct": 1}
                    ]),
                )
                .with_failure("economy.json", 500)
                .with_raw("ir.json", "<html>oops</html>"),
        );
        let files = source.list().await.unwrap();

        let loaded = load_banks(source.clone(), &files, 2).await;
        assert_eq!(loaded.questions.len(), 2);
        assert_eq!(loaded.failed().count(), 2);
        assert_eq!(source.call_count(), 3);
    }
}
