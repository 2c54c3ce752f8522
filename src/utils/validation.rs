use crate::utils::error::{Result, SearchError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> SearchError {
    SearchError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

/// Path prefixes are glued between a base address and a provider name.
pub fn validate_path_prefix(field_name: &str, prefix: &str) -> Result<()> {
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        return Err(invalid(
            field_name,
            prefix,
            "Path prefix must start and end with '/'",
        ));
    }
    if prefix.contains(char::is_whitespace) || prefix.contains('?') || prefix.contains('#') {
        return Err(invalid(
            field_name,
            prefix,
            "Path prefix cannot contain whitespace, '?' or '#'",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Provider names end up as the last URL path segment, so keep them boring.
pub fn validate_provider_names(field_name: &str, providers: &[String]) -> Result<()> {
    let mut seen = HashSet::new();

    for provider in providers {
        validate_non_empty_string(field_name, provider)?;

        if !provider
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                field_name,
                provider,
                "Provider names can only contain letters, digits, '-' and '_'",
            ));
        }

        if !seen.insert(provider.as_str()) {
            return Err(invalid(field_name, provider, "Duplicate provider"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("scrapers.host", "http://127.0.0.1:9000").is_ok());
        assert!(validate_url("scrapers.host", "https://scrapers.example.com").is_ok());
        assert!(validate_url("scrapers.host", "").is_err());
        assert!(validate_url("scrapers.host", "invalid-url").is_err());
        assert!(validate_url("scrapers.host", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path_prefix() {
        assert!(validate_path_prefix("scrapers.prefix", "/scrapers/").is_ok());
        assert!(validate_path_prefix("scrapers.prefix", "/").is_ok());
        assert!(validate_path_prefix("scrapers.prefix", "scrapers/").is_err());
        assert!(validate_path_prefix("scrapers.prefix", "/scrapers").is_err());
        assert!(validate_path_prefix("scrapers.prefix", "/scr apers/").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("scrapers.providers", 5, 1).is_ok());
        assert!(validate_positive_number("scrapers.providers", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("scrapers.timeout_seconds", 10, 1, 300).is_ok());
        assert!(validate_range("scrapers.timeout_seconds", 0, 1, 300).is_err());
        assert!(validate_range("scrapers.timeout_seconds", 301, 1, 300).is_err());
    }

    #[test]
    fn test_validate_provider_names() {
        let good = vec!["expedia".to_string(), "united_2".to_string(), "kayak-eu".to_string()];
        assert!(validate_provider_names("scrapers.providers", &good).is_ok());

        let dupes = vec!["orbitz".to_string(), "orbitz".to_string()];
        assert!(validate_provider_names("scrapers.providers", &dupes).is_err());

        let unsafe_name = vec!["../admin".to_string()];
        assert!(validate_provider_names("scrapers.providers", &unsafe_name).is_err());

        let blank = vec![" ".to_string()];
        assert!(validate_provider_names("scrapers.providers", &blank).is_err());
    }
}
