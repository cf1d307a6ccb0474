//! Banks served by a static HTTP host under `{base_url}/data/`.

use async_trait::async_trait;
use tracing::instrument;

use prelims_core::traits::BankSource;

use crate::error::SourceError;

/// Fetches `{base_url}/data/{file}` with a plain GET.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("prelims/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, file: &str) -> String {
        format!("{}/data/{}", self.base_url, file)
    }
}

#[async_trait]
impl BankSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn fetch(&self, file: &str) -> anyhow::Result<String> {
        let url = self.url_for(file);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(SourceError::NotFound(url).into());
        }
        if !response.status().is_success() {
            return Err(SourceError::Http { status, url }.into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        tracing::debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }
}
