pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SCRAPER_HOST: &str = "http://127.0.0.1:9000";
pub const DEFAULT_SCRAPER_PREFIX: &str = "/scrapers/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_PROVIDERS: [&str; 5] =
    ["expedia", "orbitz", "priceline", "travelocity", "united"];
pub const DEFAULT_USER_AGENT: &str = "HipflightsService/0.1";

/// Upper bound on fan-out width. Each search spawns one task per provider.
pub const MAX_PROVIDERS: usize = 64;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub fn default_providers() -> Vec<String> {
    DEFAULT_PROVIDERS.iter().map(|p| p.to_string()).collect()
}

/// Resolved scraper settings. Built once at startup and handed to the
/// dispatcher and HTTP client; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperSettings {
    pub host: String,
    pub prefix: String,
    pub timeout: Duration,
    pub providers: Vec<String>,
    pub user_agent: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SCRAPER_HOST.to_string(),
            prefix: DEFAULT_SCRAPER_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            providers: default_providers(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            host: config.scraper_host().to_string(),
            prefix: config.scraper_prefix().to_string(),
            timeout: config.scraper_timeout(),
            providers: config.providers().to_vec(),
            user_agent: config.user_agent().to_string(),
        }
    }
}

impl ConfigProvider for ScraperSettings {
    fn scraper_host(&self) -> &str {
        &self.host
    }

    fn scraper_prefix(&self) -> &str {
        &self.prefix
    }

    fn scraper_timeout(&self) -> Duration {
        self.timeout
    }

    fn providers(&self) -> &[String] {
        &self.providers
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ScraperSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("scrapers.host", &self.host)?;
        validation::validate_path_prefix("scrapers.prefix", &self.prefix)?;
        validation::validate_range(
            "scrapers.timeout_seconds",
            self.timeout.as_secs(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
        validation::validate_positive_number("scrapers.providers", self.providers.len(), 1)?;
        validation::validate_range("scrapers.providers", self.providers.len(), 1, MAX_PROVIDERS)?;
        validation::validate_provider_names("scrapers.providers", &self.providers)?;
        validation::validate_non_empty_string("scrapers.user_agent", &self.user_agent)?;

        tracing::debug!("✅ Scraper configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::TomlConfig;
    use crate::utils::error::Result;
    use clap::Parser;
    use std::path::PathBuf;

    /// Command line flags. Every setting is optional so an explicit flag
    /// can be told apart from a value that should come from the config file.
    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "hipflights")]
    #[command(about = "Flight search aggregator over the scraper API")]
    pub struct CliConfig {
        /// What host to serve from [default: 127.0.0.1]
        #[arg(short = 'H', long)]
        pub host: Option<String>,

        /// What port to serve from [default: 8000]
        #[arg(short, long)]
        pub port: Option<u16>,

        /// Base address of the scraper API [default: http://127.0.0.1:9000]
        #[arg(long)]
        pub scraper_host: Option<String>,

        /// Path prefix for scraper endpoints [default: /scrapers/]
        #[arg(long)]
        pub scraper_prefix: Option<String>,

        /// Seconds to wait for each scraper [default: 10]
        #[arg(long)]
        pub timeout_secs: Option<u64>,

        /// Comma separated provider names
        #[arg(long, value_delimiter = ',')]
        pub providers: Option<Vec<String>>,

        /// User-Agent sent to the scrapers [default: HipflightsService/0.1]
        #[arg(long)]
        pub user_agent: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Config file (if any) with explicit flags layered on top.
        pub fn load(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path.display());
                    TomlConfig::from_file(path)?
                }
                None => TomlConfig::default(),
            };

            self.apply_to(&mut config);
            Ok(config)
        }

        pub fn apply_to(&self, config: &mut TomlConfig) {
            if let Some(host) = &self.host {
                config.server.host = host.clone();
            }
            if let Some(port) = self.port {
                config.server.port = port;
            }
            if let Some(scraper_host) = &self.scraper_host {
                config.scrapers.host = scraper_host.clone();
            }
            if let Some(prefix) = &self.scraper_prefix {
                config.scrapers.prefix = prefix.clone();
            }
            if let Some(timeout) = self.timeout_secs {
                config.scrapers.timeout_seconds = timeout;
            }
            if let Some(providers) = &self.providers {
                config.scrapers.providers = providers.clone();
            }
            if let Some(user_agent) = &self.user_agent {
                config.scrapers.user_agent = user_agent.clone();
            }
        }
    }
}
