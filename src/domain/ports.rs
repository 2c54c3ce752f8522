use crate::domain::model::Flight;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// One upstream scraper call. Implementations must return the provider's
/// list exactly as received, already ordered by agony.
#[async_trait]
pub trait ScraperClient: Send + Sync + 'static {
    async fn fetch_results(&self, provider: &str) -> Result<Vec<Flight>>;
}

pub trait ConfigProvider: Send + Sync {
    fn scraper_host(&self) -> &str;
    fn scraper_prefix(&self) -> &str;
    fn scraper_timeout(&self) -> Duration;
    fn providers(&self) -> &[String];
    fn user_agent(&self) -> &str;
}
