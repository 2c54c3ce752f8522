use crate::config::ScraperSettings;
use crate::core::{Flight, Result, ScraperClient};
use crate::domain::model::ScraperResponse;
use crate::utils::error::SearchError;
use async_trait::async_trait;
use reqwest::Client;

/// Talks to the scraper API over HTTP: `GET <host><prefix><provider>`.
#[derive(Debug, Clone)]
pub struct HttpScraperClient {
    client: Client,
    base_url: String,
}

impl HttpScraperClient {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        // reqwest keeps its default headers; only the user agent is replaced
        let client = Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| SearchError::ConfigError {
                message: format!("Failed to build scraper HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: format!("{}{}", settings.host.trim_end_matches('/'), settings.prefix),
        })
    }

    pub fn endpoint_for(&self, provider: &str) -> String {
        format!("{}{}", self.base_url, provider)
    }
}

#[async_trait]
impl ScraperClient for HttpScraperClient {
    async fn fetch_results(&self, provider: &str) -> Result<Vec<Flight>> {
        let url = self.endpoint_for(provider);
        tracing::debug!("Making scraper request to: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::transport(provider, e))?;

        let status = response.status();
        tracing::debug!("Scraper {} response status: {}", provider, status);

        if !status.is_success() {
            return Err(SearchError::transport(
                provider,
                format!("unexpected HTTP status {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::transport(provider, e))?;

        let parsed: ScraperResponse = serde_json::from_slice(&body).map_err(|e| {
            SearchError::transport(provider, format!("malformed scraper response: {}", e))
        })?;

        Ok(parsed.results)
    }
}
