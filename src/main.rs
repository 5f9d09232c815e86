//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the Ripple-Crawl crawler.

use clap::Parser;
use ripple_crawl::config::{load_config, validate, Config, FetcherKind};
use ripple_crawl::crawler::{build_fetcher, Crawler};
use ripple_crawl::output::{print_report, StdoutSink};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Ripple-Crawl: a bounded-depth concurrent crawler
///
/// Crawls from a root URL, fetching every reachable page at most once and
/// following links up to the configured depth. Without a config file it
/// walks the built-in golang.org tour fixture.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawl")]
#[command(version)]
#[command(about = "A bounded-depth concurrent crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the root URL
    #[arg(long, value_name = "URL")]
    root: Option<String>,

    /// Override the maximum depth
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    depth: Option<i32>,

    /// Fetch pages over HTTP instead of from fixture pages
    #[arg(long)]
    http: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print crawl statistics when the crawl finishes
    #[arg(long)]
    stats: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(&config, cli.stats).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or the built-in tour) and applies CLI overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => {
            tracing::info!("No configuration given, using the built-in tour");
            Config::default()
        }
    };

    if let Some(root) = &cli.root {
        config.crawler.root_url = root.clone();
    }
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if cli.http {
        config.fetcher.kind = FetcherKind::Http;
    }

    // Overrides can break what the file alone satisfied.
    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Ripple-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Root URL: {}", config.crawler.root_url);
    println!("  Max depth: {}", config.crawler.max_depth);

    println!("\nFetcher:");
    println!("  Kind: {:?}", config.fetcher.kind);
    match config.fetcher.kind {
        FetcherKind::Http => {
            println!("  Timeout: {}s", config.fetcher.timeout_secs);
            println!("  User agent: {}", config.fetcher.user_agent);
        }
        FetcherKind::Fixture if config.pages.is_empty() => {
            println!("  Pages: built-in tour");
        }
        FetcherKind::Fixture => {
            println!("  Pages ({}):", config.pages.len());
            for page in &config.pages {
                println!("    - {} -> {} links", page.url, page.links.len());
            }
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, show_stats: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = build_fetcher(config)?;
    let crawler = Crawler::new(fetcher, Arc::new(StdoutSink::new()));

    let report = crawler
        .run(&config.crawler.root_url, config.crawler.max_depth)
        .await;

    if show_stats {
        println!();
        print_report(&report);
    }

    Ok(())
}
