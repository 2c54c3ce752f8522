use crate::config::ScraperSettings;
use crate::core::{ProviderOutcome, ScraperClient};
use crate::domain::model::Flight;
use crate::utils::error::{Result, SearchError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

type ProviderTask = JoinHandle<Result<Vec<Flight>>>;

/// Aborts every provider task still running when the request is abandoned,
/// whether that is a timeout, a failed provider, or the caller going away.
struct AbortOnDrop(Vec<ProviderTask>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for task in &self.0 {
            task.abort();
        }
    }
}

/// Fans one search out to every configured scraper provider.
pub struct Dispatcher<C: ScraperClient> {
    client: Arc<C>,
    providers: Vec<String>,
    timeout: Duration,
}

impl<C: ScraperClient> Dispatcher<C> {
    pub fn new(client: C, providers: Vec<String>, timeout: Duration) -> Result<Self> {
        if providers.is_empty() {
            return Err(SearchError::ConfigError {
                message: "at least one scraper provider must be configured".to_string(),
            });
        }

        Ok(Self {
            client: Arc::new(client),
            providers,
            timeout,
        })
    }

    pub fn from_settings(client: C, settings: &ScraperSettings) -> Result<Self> {
        Self::new(client, settings.providers.clone(), settings.timeout)
    }

    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Query every provider concurrently.
    ///
    /// All calls start up front. The results are then awaited in provider
    /// order, each wait bounded by the full timeout. The first provider that
    /// times out or fails ends the whole dispatch; the remaining calls are
    /// aborted and nothing partial is returned.
    ///
    /// On success slot `i` holds the list of `providers()[i]`.
    pub async fn run(&self) -> Result<Vec<Vec<Flight>>> {
        let mut tasks = AbortOnDrop(Vec::with_capacity(self.providers.len()));

        for provider in &self.providers {
            tracing::debug!(%provider, "dispatching scraper request");
            let client = Arc::clone(&self.client);
            let provider = provider.clone();
            tasks
                .0
                .push(tokio::spawn(async move { client.fetch_results(&provider).await }));
        }

        let mut slots = Vec::with_capacity(self.providers.len());

        for (provider, task) in self.providers.iter().zip(tasks.0.iter_mut()) {
            let outcome = self.wait_for(provider, task).await;

            match &outcome {
                ProviderOutcome::Success(flights) => {
                    tracing::debug!(%provider, count = flights.len(), "scraper responded");
                }
                ProviderOutcome::TimedOut => {
                    tracing::warn!(
                        %provider,
                        timeout = ?self.timeout,
                        "scraper timed out, aborting search"
                    );
                }
                ProviderOutcome::Failed(err) => {
                    tracing::warn!(%provider, error = %err, "scraper failed, aborting search");
                }
            }

            slots.push(outcome.into_result(provider, self.timeout)?);
        }

        Ok(slots)
    }

    async fn wait_for(&self, provider: &str, task: &mut ProviderTask) -> ProviderOutcome {
        match tokio::time::timeout(self.timeout, task).await {
            Err(_elapsed) => ProviderOutcome::TimedOut,
            Ok(Err(join_error)) => ProviderOutcome::Failed(SearchError::transport(
                provider,
                format!("scraper task did not complete: {}", join_error),
            )),
            Ok(Ok(Err(err))) => ProviderOutcome::Failed(err),
            Ok(Ok(Ok(flights))) => ProviderOutcome::Success(flights),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{FakeReply, FakeScraper};
    use std::sync::atomic::Ordering;

    fn providers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_all_providers_succeed_in_provider_order() {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::after_ms(30, &[1.0, 4.0]))
            .reply("orbitz", FakeReply::after_ms(0, &[2.0]))
            .reply("united", FakeReply::after_ms(10, &[]));

        let dispatcher = Dispatcher::new(
            scraper,
            providers(&["expedia", "orbitz", "united"]),
            Duration::from_secs(2),
        )
        .unwrap();

        let slots = dispatcher.run().await.unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].len(), 2);
        assert_eq!(slots[1].len(), 1);
        assert!(slots[2].is_empty());
    }

    #[tokio::test]
    async fn test_single_timeout_fails_whole_dispatch() {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::after_ms(0, &[1.0]))
            .reply("orbitz", FakeReply::Hang)
            .reply("united", FakeReply::after_ms(0, &[2.0]));

        let dispatcher = Dispatcher::new(
            scraper,
            providers(&["expedia", "orbitz", "united"]),
            Duration::from_millis(100),
        )
        .unwrap();

        match dispatcher.run().await {
            Err(SearchError::ProviderTimeout { provider, timeout }) => {
                assert_eq!(provider, "orbitz");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_reported_without_waiting_for_later_providers() {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::Hang)
            .reply("orbitz", FakeReply::after_ms(5_000, &[1.0]));

        let dispatcher = Dispatcher::new(
            scraper,
            providers(&["expedia", "orbitz"]),
            Duration::from_millis(100),
        )
        .unwrap();

        let started = std::time::Instant::now();
        let result = dispatcher.run().await;
        assert!(matches!(result, Err(SearchError::ProviderTimeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_transport_failure_fails_whole_dispatch() {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::after_ms(0, &[1.0]))
            .reply("priceline", FakeReply::Fail("malformed body".to_string()));

        let dispatcher = Dispatcher::new(
            scraper,
            providers(&["expedia", "priceline"]),
            Duration::from_secs(1),
        )
        .unwrap();

        match dispatcher.run().await {
            Err(SearchError::ProviderTransport { provider, message }) => {
                assert_eq!(provider, "priceline");
                assert_eq!(message, "malformed body");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_abandoned_calls_are_cancelled() {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::Hang)
            .reply("orbitz", FakeReply::after_ms(300, &[1.0]));
        let finished = scraper.finished_counter();

        let dispatcher = Dispatcher::new(
            scraper,
            providers(&["expedia", "orbitz"]),
            Duration::from_millis(50),
        )
        .unwrap();

        assert!(dispatcher.run().await.is_err());

        // orbitz would have finished by now had it not been aborted
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_panicking_provider_is_a_failure() {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::after_ms(0, &[1.0]))
            .reply("travelocity", FakeReply::Panic);

        let dispatcher = Dispatcher::new(
            scraper,
            providers(&["expedia", "travelocity"]),
            Duration::from_secs(1),
        )
        .unwrap();

        match dispatcher.run().await {
            Err(SearchError::ProviderTransport { provider, .. }) => {
                assert_eq!(provider, "travelocity");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_provider_set_is_rejected() {
        let result = Dispatcher::new(FakeScraper::new(), Vec::new(), Duration::from_secs(1));
        assert!(matches!(result, Err(SearchError::ConfigError { .. })));
    }
}
