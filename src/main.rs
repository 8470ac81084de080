//! Epaper-Harvest main entry point
//!
//! Command-line front-end: pick an edition date, run the harvest, write the
//! archive and print the run summary.

use anyhow::Context;
use clap::Parser;
use epaper_harvest::config::{load_config_with_hash, Config, PageErrorPolicy};
use epaper_harvest::crawler::{harvest, CrawlDate, CrawlTarget};
use epaper_harvest::locator::Locators;
use epaper_harvest::output::{archive_file_name, print_statistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Epaper-Harvest: download every image of a dated e-paper edition
///
/// Pages are walked from 1 upwards; on each page article IDs are probed
/// sequentially until a long run of missing articles. All images found are
/// packaged into a single zip archive.
#[derive(Parser, Debug)]
#[command(name = "epaper-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvest images from an e-paper edition", long_about = None)]
struct Cli {
    /// Edition date as dd-mm-yyyy (defaults to today)
    #[arg(short, long, value_name = "DATE")]
    date: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory to write the archive into (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Continue with the next page when a page fails instead of stopping
    #[arg(long)]
    skip_failed_pages: bool,

    /// Show what would be harvested without sending any request
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if cli.skip_failed_pages {
        config.crawler.on_page_error = PageErrorPolicy::Skip;
    }
    if let Some(dir) = &cli.output {
        config.output.directory = dir.display().to_string();
    }

    let today = chrono::Local::now().date_naive();
    let date = match &cli.date {
        Some(input) => CrawlDate::parse(input)?,
        None => CrawlDate::new(today),
    };
    date.ensure_within_window(today, config.crawler.date_window_days)?;

    if cli.dry_run {
        handle_dry_run(&config, date)?;
    } else {
        handle_harvest(&config, date).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("epaper_harvest=info,warn"),
            1 => EnvFilter::new("epaper_harvest=debug,info"),
            2 => EnvFilter::new("epaper_harvest=trace,debug"),
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

/// Handles --dry-run: prints the effective configuration and first locator
fn handle_dry_run(config: &Config, date: CrawlDate) -> anyhow::Result<()> {
    let locators = Locators::from_config(&config.publication)?;

    println!("=== Epaper-Harvest Dry Run ===\n");

    println!("Publication:");
    println!("  Base URL: {}", config.publication.base_url);
    println!("  Edition: {}", config.publication.edition);
    println!("  Date: {}", date);

    println!("\nCrawler:");
    println!("  Miss threshold: {}", config.crawler.miss_threshold);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  On page error: {:?}", config.crawler.on_page_error);
    println!("  Image naming: {:?}", config.crawler.image_naming);

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Transport retries: {}", config.http.transport_retries);

    println!(
        "\n✓ Would start at {}",
        locators.page_url(&CrawlTarget::new(date, 1))
    );
    println!(
        "✓ Would write {}",
        Path::new(&config.output.directory)
            .join(archive_file_name(&config.publication.slug, &date))
            .display()
    );

    Ok(())
}

/// Runs the harvest and writes the archive
async fn handle_harvest(config: &Config, date: CrawlDate) -> anyhow::Result<()> {
    let result = harvest(config, date).await?;

    print_statistics(&result.stats, &result.failures);

    match result.archive {
        Some(archive) => {
            let dir = Path::new(&config.output.directory);
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
            let path = dir.join(&archive.file_name);
            std::fs::write(&path, &archive.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;

            println!(
                "\n✓ Successfully scraped {} images ({} archive entries) into {}",
                result.stats.total_images,
                archive.entries,
                path.display()
            );
        }
        None => {
            tracing::warn!("No images found for the selected date.");
        }
    }

    Ok(())
}
