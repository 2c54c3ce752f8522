use crate::core::dispatcher::Dispatcher;
use crate::core::merger::merge_ranked;
use crate::core::{Result, ScraperClient, SearchResponse};
use std::time::Instant;

/// One flight search: dispatch to every provider, then merge by agony.
pub struct FlightSearch<C: ScraperClient> {
    dispatcher: Dispatcher<C>,
}

impl<C: ScraperClient> FlightSearch<C> {
    pub fn new(dispatcher: Dispatcher<C>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher<C> {
        &self.dispatcher
    }

    pub async fn search(&self) -> Result<SearchResponse> {
        let started = Instant::now();

        // Any provider failure ends the search here, before merging.
        let per_provider = self.dispatcher.run().await?;
        let provider_count = per_provider.len();

        let results = merge_ranked(per_provider);

        tracing::info!(
            providers = provider_count,
            results = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "✅ flight search completed"
        );

        Ok(SearchResponse { results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{FakeReply, FakeScraper};
    use crate::domain::model::AgonyScore;
    use crate::utils::error::SearchError;
    use std::time::Duration;

    const PROVIDERS: [&str; 5] = ["expedia", "orbitz", "priceline", "travelocity", "united"];

    fn five_provider_search(orbitz: FakeReply) -> FlightSearch<FakeScraper> {
        let scraper = FakeScraper::new()
            .reply("expedia", FakeReply::after_ms(20, &[1.0, 6.0]))
            .reply("orbitz", orbitz)
            .reply("priceline", FakeReply::after_ms(5, &[3.0, 8.0]))
            .reply("travelocity", FakeReply::after_ms(0, &[4.0, 9.0]))
            .reply("united", FakeReply::after_ms(15, &[5.0, 10.0]));

        let dispatcher = Dispatcher::new(
            scraper,
            PROVIDERS.iter().map(|p| p.to_string()).collect(),
            Duration::from_millis(200),
        )
        .unwrap();

        FlightSearch::new(dispatcher)
    }

    #[tokio::test]
    async fn test_five_providers_merge_into_sorted_response() {
        let search = five_provider_search(FakeReply::after_ms(10, &[2.0, 7.0]));

        let response = search.search().await.unwrap();
        let agony: Vec<AgonyScore> = response.results.iter().map(|f| f.agony).collect();
        let expected: Vec<AgonyScore> = (1..=10).map(|a| AgonyScore(a as f64)).collect();

        assert_eq!(agony, expected);
    }

    #[tokio::test]
    async fn test_repeated_searches_are_identical() {
        let search = five_provider_search(FakeReply::after_ms(1, &[1.0, 6.0]));

        let first = search.search().await.unwrap();
        let second = search.search().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.results.len(), 10);
    }

    #[tokio::test]
    async fn test_timeout_produces_no_response() {
        let search = five_provider_search(FakeReply::Hang);

        match search.search().await {
            Err(SearchError::ProviderTimeout { provider, .. }) => assert_eq!(provider, "orbitz"),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_provider_fails_search() {
        let search = five_provider_search(FakeReply::Fail("missing field `results`".to_string()));

        let err = search.search().await.unwrap_err();
        assert!(matches!(err, SearchError::ProviderTransport { .. }));
    }
}
