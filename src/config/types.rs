use serde::Deserialize;

/// Main configuration structure for Ripple-Crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default, rename = "page")]
    pub pages: Vec<PageEntry>,
}

/// Crawl root and hop budget
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Maximum number of hops, the root page included
    #[serde(rename = "max-depth")]
    pub max_depth: i32,
}

/// Which fetch implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Serve pages from `[[page]]` entries (or the built-in tour)
    #[default]
    Fixture,

    /// Fetch pages over HTTP(S)
    Http,
}

/// Fetcher configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    #[serde(default)]
    pub kind: FetcherKind,

    /// Per-request timeout for the HTTP fetcher (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent by the HTTP fetcher
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// One canned page for the fixture fetcher
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageEntry {
    pub url: String,
    pub body: String,
    #[serde(default)]
    pub links: Vec<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("ripple-crawl/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            kind: FetcherKind::default(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    /// The built-in tour: fixture fetcher, golang.org root, four hops
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                root_url: "http://golang.org/".to_string(),
                max_depth: 4,
            },
            fetcher: FetcherConfig::default(),
            pages: Vec::new(),
        }
    }
}
