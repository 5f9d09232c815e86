use crate::config::types::{Config, CrawlerConfig, FetcherConfig, FetcherKind, PageEntry};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Largest accepted hop budget
pub const MAX_DEPTH_LIMIT: i32 = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    if config.fetcher.kind == FetcherKind::Http {
        validate_http_root(&config.crawler.root_url)?;
    }
    validate_pages(&config.pages)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.root_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "root_url cannot be empty".to_string(),
        ));
    }

    if !(0..=MAX_DEPTH_LIMIT).contains(&config.max_depth) {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 0 and {}, got {}",
            MAX_DEPTH_LIMIT, config.max_depth
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// The HTTP fetcher needs a root it can actually request
fn validate_http_root(root_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root_url '{}': {}", root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root_url must use http or https, got '{}'",
            root_url
        )));
    }

    Ok(())
}

/// Validates fixture page entries
fn validate_pages(pages: &[PageEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for page in pages {
        if page.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "page url cannot be empty".to_string(),
            ));
        }

        if !seen.insert(page.url.as_str()) {
            return Err(ConfigError::Validation(format!(
                "page '{}' is defined more than once",
                page.url
            )));
        }
    }

    Ok(())
}
