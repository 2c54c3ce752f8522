pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpScraperClient;
pub use api::{build_router, FlightServer, SEARCH_ROUTE};
pub use config::{ScraperSettings, TomlConfig};
pub use self::core::{
    dispatcher::Dispatcher,
    merger::{merge_ranked, merge_sorted, KMerge},
    search::FlightSearch,
};
pub use domain::model::{AgonyScore, Flight, Ranked, SearchResponse};
pub use domain::ports::ScraperClient;
pub use utils::error::{Result, SearchError};
