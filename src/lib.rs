//! Ripple-Crawl: a bounded-depth concurrent crawler
//!
//! This crate walks a link graph from a root URL, spawning one task per
//! discovered link. Every URL is fetched at most once, recursion is bounded
//! by a hop budget, and the driver returns only after the whole transitive
//! fetch tree has finished.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Ripple-Crawl operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors a fetcher reports for a single URL
///
/// These never abort a crawl. The task that hit one hands it to the output
/// sink and ends its branch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// Returns the URL this error was reported for
    pub fn url(&self) -> &str {
        match self {
            Self::NotFound { url }
            | Self::Status { url, .. }
            | Self::Network { url, .. }
            | Self::InvalidUrl { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Result type alias for Ripple-Crawl operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Crawler, FetchedPage, Fetcher, FixtureFetcher, HttpFetcher};
pub use output::{CrawlRecord, CrawlReport, CrawlSink, MemorySink, StdoutSink};
pub use state::{CompletionTracker, PendingTask, VisitedSet};
