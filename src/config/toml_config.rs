use crate::config::{
    default_providers, ScraperSettings, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCRAPER_HOST,
    DEFAULT_SCRAPER_PREFIX, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub scrapers: ScrapersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapersConfig {
    pub host: String,
    pub prefix: String,
    pub timeout_seconds: u64,
    pub providers: Vec<String>,
    pub user_agent: String,
}

impl Default for ScrapersConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SCRAPER_HOST.to_string(),
            prefix: DEFAULT_SCRAPER_PREFIX.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            providers: default_providers(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCRAPER_HOST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SearchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn scraper_settings(&self) -> ScraperSettings {
        ScraperSettings::from_config(self)
    }
}

impl ConfigProvider for TomlConfig {
    fn scraper_host(&self) -> &str {
        &self.scrapers.host
    }

    fn scraper_prefix(&self) -> &str {
        &self.scrapers.prefix
    }

    fn scraper_timeout(&self) -> Duration {
        Duration::from_secs(self.scrapers.timeout_seconds)
    }

    fn providers(&self) -> &[String] {
        &self.scrapers.providers
    }

    fn user_agent(&self) -> &str {
        &self.scrapers.user_agent
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        self.scraper_settings().validate()
    }
}
