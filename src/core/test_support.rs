use crate::core::{Flight, Result, ScraperClient};
use crate::utils::error::SearchError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted reply for one provider.
#[derive(Clone)]
pub(crate) enum FakeReply {
    Flights { delay: Duration, flights: Vec<Flight> },
    Fail(String),
    Hang,
    Panic,
}

impl FakeReply {
    pub(crate) fn after_ms(delay_ms: u64, agony: &[f64]) -> Self {
        FakeReply::Flights {
            delay: Duration::from_millis(delay_ms),
            flights: agony.iter().map(|a| Flight::new(*a)).collect(),
        }
    }
}

/// In-process scraper used by unit tests instead of a mock HTTP server.
#[derive(Default)]
pub(crate) struct FakeScraper {
    replies: HashMap<String, FakeReply>,
    finished: Arc<AtomicUsize>,
}

impl FakeScraper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, provider: &str, reply: FakeReply) -> Self {
        self.replies.insert(provider.to_string(), reply);
        self
    }

    /// Counts calls that ran to completion (successfully or not).
    pub(crate) fn finished_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.finished)
    }
}

#[async_trait::async_trait]
impl ScraperClient for FakeScraper {
    async fn fetch_results(&self, provider: &str) -> Result<Vec<Flight>> {
        let reply = self
            .replies
            .get(provider)
            .cloned()
            .unwrap_or_else(|| FakeReply::Fail(format!("no reply scripted for {}", provider)));

        let result = match reply {
            FakeReply::Flights { delay, flights } => {
                tokio::time::sleep(delay).await;
                Ok(flights)
            }
            FakeReply::Fail(message) => Err(SearchError::transport(provider, message)),
            FakeReply::Hang => std::future::pending().await,
            FakeReply::Panic => panic!("scraper for {} blew up", provider),
        };

        self.finished.fetch_add(1, Ordering::SeqCst);
        result
    }
}
