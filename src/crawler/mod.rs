//! Crawler module for page fetching and record accumulation
//!
//! This module contains the crawl pipeline, including:
//! - Page URL sequencing from seed URLs
//! - Token-bucket rate limiting
//! - Fetching with bounded exponential-backoff retry
//! - Overall crawl coordination and deduplication

mod coordinator;
mod fetcher;
mod pagination;
mod rate_limiter;
mod retry;

pub use coordinator::{dedup_records, CrawlReport, CrawlSettings, Crawler};
pub use fetcher::{build_http_client, HttpPageSource, PageLocation, PageSource};
pub use pagination::{page_urls, PageUrls, DEFAULT_PAGE_SIZE};
pub use rate_limiter::RateLimiter;
pub use retry::{fetch_with_retry, RetryPolicy};

use crate::config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Builds a crawler over HTTP and local files from a configuration
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(Crawler)` - Ready to run
/// * `Err(HarvestError)` - The HTTP client could not be built
pub fn build_crawler(config: &Config) -> crate::Result<Crawler<HttpPageSource>> {
    let source = HttpPageSource::new(
        &config.user_agent,
        Duration::from_secs(config.crawler.timeout_seconds),
    )?;
    let limiter = Arc::new(RateLimiter::per_minute(config.crawler.requests_per_minute));

    Ok(Crawler::new(source, limiter, config.crawl_settings()))
}

/// Runs a complete crawl over the given seeds
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client and rate limiter
/// 2. Paginate and fetch each seed in order
/// 3. Extract, accumulate and deduplicate listing records
///
/// # Example
///
/// ```no_run
/// use job_harvest::config::Config;
/// use job_harvest::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let report = crawl(&config, &["https://example.com/jobs?q=rust".to_string()]).await?;
/// println!("{} listings", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config, seeds: &[String]) -> crate::Result<CrawlReport> {
    build_crawler(config)?.run(seeds).await
}
