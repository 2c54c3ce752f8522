use crate::utils::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::time::Duration;

/// Items that carry their own ordering key. The merger only ever looks at this.
pub trait Ranked {
    type Key: Ord;

    fn rank_key(&self) -> Self::Key;
}

/// Travel inconvenience score. Lower is better.
///
/// Ordered with `f64::total_cmp`, so it can live in heaps and sorted
/// collections even though the raw value is a float.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgonyScore(pub f64);

impl PartialEq for AgonyScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AgonyScore {}

impl PartialOrd for AgonyScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AgonyScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One flight as returned by a scraper.
///
/// Only `agony` is interpreted; every other field is carried through
/// untouched so the response mirrors what the providers sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub agony: AgonyScore,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Flight {
    pub fn new(agony: f64) -> Self {
        Self {
            agony: AgonyScore(agony),
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl Ranked for Flight {
    type Key = AgonyScore;

    fn rank_key(&self) -> AgonyScore {
        self.agony
    }
}

/// Body of `GET <scraper>/scrapers/<provider>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperResponse {
    pub results: Vec<Flight>,
}

/// Body of a successful `GET /flights/search/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Flight>,
}

/// What a single provider call came back with.
#[derive(Debug)]
pub enum ProviderOutcome {
    Success(Vec<Flight>),
    TimedOut,
    Failed(SearchError),
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success(_))
    }

    pub fn into_result(self, provider: &str, timeout: Duration) -> Result<Vec<Flight>> {
        match self {
            ProviderOutcome::Success(flights) => Ok(flights),
            ProviderOutcome::TimedOut => Err(SearchError::ProviderTimeout {
                provider: provider.to_string(),
                timeout,
            }),
            ProviderOutcome::Failed(err) => Err(err),
        }
    }
}
