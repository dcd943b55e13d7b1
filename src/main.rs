//! Sumi-Crawler main entry point
//!
//! This is the command-line interface for the Sumi-Crawler web crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_crawler::config::{load_config_with_hash, Config};
use sumi_crawler::crawler::Pipeline;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sumi-Crawler: A polite, composable web crawler
///
/// Sumi-Crawler crawls websites from a set of seed links while respecting
/// robots.txt and per-worker delays, and can discover extra links through
/// sitemaps. Press Ctrl-C to stop a crawl early.
#[derive(Parser, Debug)]
#[command(name = "sumi-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A polite web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_crawler=info,warn"),
            1 => EnvFilter::new("sumi_crawler=debug,info"),
            2 => EnvFilter::new("sumi_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Concurrency: {}", config.crawler.concurrency);
    println!("  Delay per worker: {}ms", config.crawler.delay_ms);
    println!(
        "  Attempts per link: {} ({}ms apart)",
        config.crawler.repeat_count, config.crawler.repeat_delay_ms
    );
    println!("  Same host only: {}", config.crawler.same_host_only);
    println!("  Sanitize links: {}", config.crawler.sanitize_links);
    println!("  Follow robots.txt: {}", config.crawler.follow_robots);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nSitemaps:");
    if config.sitemap.enabled {
        println!("  Strategies: {:?}", config.sitemap.strategies);
        match config.sitemap.max_depth {
            Some(depth) => println!("  Max depth: {}", depth),
            None => println!("  Max depth: unlimited"),
        }
        println!("  Max index depth: {}", config.sitemap.max_index_depth);
    } else {
        println!("  Disabled");
    }

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config).context("Failed to build the crawl pipeline")?;
    let token = CancellationToken::new();

    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupted, stopping the crawl");
                token.cancel();
            }
        })
    };

    tracing::info!("Total seed URLs: {}", pipeline.seeds().len());
    pipeline.run(&token).await;

    interrupt.abort();
    if token.is_cancelled() {
        tracing::info!("Crawl stopped before completion");
    } else {
        tracing::info!("Crawl completed successfully");
    }

    Ok(())
}
