//! Job-Harvest main entry point
//!
//! This is the command-line interface for the Job-Harvest listing crawler.

use anyhow::Context;
use clap::Parser;
use job_harvest::config::{
    load_config_or_default, resolve_seeds, validate, Config, DEFAULT_INPUTS_PATH,
};
use job_harvest::crawler::{build_crawler, page_urls};
use job_harvest::output::{export_records, print_statistics, OutputFormat};
use job_harvest::HarvestError;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Job-Harvest: a resilient job-listing crawler
///
/// Job-Harvest walks paginated search-result pages, extracts listing cards
/// into structured records, and exports the deduplicated result as JSON,
/// CSV, or TSV.
#[derive(Parser, Debug)]
#[command(name = "job-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A resilient job-listing crawler", long_about = None)]
struct Cli {
    /// Seed search URL (repeatable); overrides the inputs file
    #[arg(long = "url", value_name = "URL")]
    urls: Vec<String>,

    /// File with one seed URL per line
    #[arg(long, value_name = "FILE", default_value = DEFAULT_INPUTS_PATH)]
    inputs: PathBuf,

    /// Path to TOML settings file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of listings to collect
    #[arg(long, value_name = "N")]
    max_results: Option<usize>,

    /// Export format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Export file path
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Maximum number of pages per seed
    #[arg(long, value_name = "N")]
    pages: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Explicit log filter (e.g. "debug"); overrides -v and -q
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Validate settings and show the pages that would be fetched
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, cli.log_level.as_deref());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            match e.downcast_ref::<HarvestError>() {
                Some(HarvestError::NoSeeds) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_settings(&cli)?;

    let seeds = resolve_seeds(&cli.urls, Some(&cli.inputs))
        .with_context(|| format!("Failed to read seeds from {}", cli.inputs.display()))?;
    if seeds.is_empty() {
        return Err(HarvestError::NoSeeds.into());
    }
    tracing::info!("Resolved {} seed URLs", seeds.len());

    if cli.dry_run {
        handle_dry_run(&config, &seeds);
        return Ok(());
    }

    handle_crawl(&config, &seeds).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, log_level: Option<&str>) {
    let filter = if let Some(level) = log_level {
        EnvFilter::new(level)
    } else if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_harvest=info,warn"),
            1 => EnvFilter::new("job_harvest=debug,info"),
            2 => EnvFilter::new("job_harvest=trace,debug"),
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

/// Loads the settings file and applies command-line overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = load_config_or_default(cli.config.as_deref())
        .map_err(HarvestError::from)
        .context("Failed to load configuration")?;

    if let Some(max_results) = cli.max_results {
        config.crawler.max_results = max_results;
    }
    if let Some(pages) = cli.pages {
        config.crawler.max_pages = Some(pages);
    }
    if let Some(format) = cli.format {
        config.output.format = format;
        if cli.out.is_none() {
            config.output.path = config.output.path.with_extension(format.as_str());
        }
    }
    if let Some(out) = &cli.out {
        config.output.path = out.clone();
    }

    validate(&config)
        .map_err(HarvestError::from)
        .context("Invalid command-line overrides")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows settings and the page URLs of each seed
fn handle_dry_run(config: &Config, seeds: &[String]) {
    let settings = config.crawl_settings();

    println!("=== Job-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max results: {}", settings.max_results);
    println!("  Page size: {}", settings.page_size);
    match settings.max_pages {
        Some(pages) => println!("  Max pages per seed: {}", pages),
        None => println!("  Max pages per seed: derived from max results"),
    }
    println!(
        "  Requests per minute: {}",
        config.crawler.requests_per_minute
    );
    println!("  Timeout: {}s", config.crawler.timeout_seconds);

    println!("\nRetry:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!("  Initial delay: {}ms", config.retry.initial_delay_ms);
    println!("  Backoff factor: {}", config.retry.backoff_factor);
    println!("  Max delay: {}ms", config.retry.max_delay_ms);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header);

    println!("\nOutput:");
    println!("  Format: {}", config.output.format);
    println!("  Path: {}", config.output.path.display());

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        println!("  - {}", seed);
        match page_urls(
            seed,
            settings.max_results,
            settings.page_size,
            settings.max_pages,
        ) {
            Ok(pages) => {
                for page in pages {
                    println!("    * {}", page);
                }
            }
            Err(e) => println!("    ! skipped: {}", e),
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seeds: &[String]) -> anyhow::Result<()> {
    let crawler = build_crawler(config).context("Failed to build HTTP client")?;

    let cancel = crawler.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing with the listings collected so far");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let report = crawler.run(seeds).await.context("Crawl failed")?;

    export_records(&report.records, config.output.format, &config.output.path)
        .map_err(HarvestError::from)
        .with_context(|| format!("Failed to export to {}", config.output.path.display()))?;

    print_statistics(&report.stats);
    Ok(())
}
