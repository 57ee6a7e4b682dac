//! Forager main entry point
//!
//! This is the command-line interface for the Forager image harvester.

use anyhow::Context;
use clap::Parser;
use forager::config::{load_config_with_hash, load_manufacturers};
use forager::pipeline::run_harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Forager: a manufacturer product-image harvester
///
/// Forager crawls manufacturer websites while respecting robots.txt and a
/// politeness delay, collects candidate product images with their page
/// provenance, and stores them under deterministic structured names.
#[derive(Parser, Debug)]
#[command(name = "forager")]
#[command(version = "0.1.0")]
#[command(about = "A manufacturer product-image harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Path to TOML manufacturer roster
    #[arg(value_name = "MANUFACTURERS")]
    manufacturers: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    tracing::info!("Loading roster from: {}", cli.manufacturers.display());
    let manufacturers = load_manufacturers(&cli.manufacturers)
        .with_context(|| format!("failed to load roster {}", cli.manufacturers.display()))?;
    tracing::info!("Loaded {} manufacturers", manufacturers.len());

    if cli.dry_run {
        handle_dry_run(&config, &manufacturers);
        return Ok(());
    }

    let downloaded = run_harvest(&config, &manufacturers, &config_hash)
        .await
        .context("harvest failed")?;
    tracing::info!("Harvest completed: {} images stored", downloaded.len());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("forager=info,warn"),
            1 => EnvFilter::new("forager=debug,info"),
            2 => EnvFilter::new("forager=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &forager::Config, manufacturers: &[forager::ManufacturerEntry]) {
    println!("=== Forager Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Max pages per domain: {}", config.crawl.max_pages_per_domain);
    println!("  Politeness delay: {}ms", config.crawl.politeness_delay_ms);
    println!("  Fetch retries: {}", config.crawl.fetch_retries);
    println!("  Fetch timeout: {}s", config.crawl.fetch_timeout_secs);
    println!(
        "  Max concurrent domains: {}",
        config.crawl.max_concurrent_domains
    );
    println!("  User agent: {}", config.crawl.user_agent);

    println!("\nDownload:");
    println!("  Directory: {}", config.download.download_dir);
    println!("  Manifest: {}", config.download.manifest_path);
    println!(
        "  Max concurrent downloads: {}",
        config.download.max_concurrent_downloads
    );

    println!("\nManufacturers ({}):", manufacturers.len());
    for entry in manufacturers {
        println!("  {:>4}. {} ({})", entry.ordinal, entry.name, entry.website);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would harvest {} domains", manufacturers.len());
}
