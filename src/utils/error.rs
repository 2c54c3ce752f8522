use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Scraper '{provider}' did not respond within {timeout:?}")]
    ProviderTimeout { provider: String, timeout: Duration },

    #[error("Scraper '{provider}' request failed: {message}")]
    ProviderTransport { provider: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

impl SearchError {
    pub fn transport(provider: &str, cause: impl std::fmt::Display) -> Self {
        SearchError::ProviderTransport {
            provider: provider.to_string(),
            message: cause.to_string(),
        }
    }

    /// Provider failures are the only errors a search request can hit at runtime.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SearchError::ProviderTimeout { .. } | SearchError::ProviderTransport { .. }
        )
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;

        match self {
            SearchError::ProviderTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            SearchError::ProviderTransport { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand to API clients. Never contains upstream error text.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SearchError::ProviderTimeout { provider, .. } => {
                format!("Flight provider '{}' timed out", provider)
            }
            SearchError::ProviderTransport { provider, .. } => {
                format!("Flight provider '{}' returned an invalid response", provider)
            }
            SearchError::ConfigError { .. } | SearchError::InvalidConfigValueError { .. } => {
                "Service is misconfigured".to_string()
            }
            SearchError::IoError(_) | SearchError::ServerError { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
