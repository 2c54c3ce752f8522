pub mod dispatcher;
pub mod merger;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{Flight, ProviderOutcome, Ranked, SearchResponse};
pub use crate::domain::ports::{ConfigProvider, ScraperClient};
pub use crate::utils::error::Result;
