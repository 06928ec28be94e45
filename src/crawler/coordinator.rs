//! Crawl coordination
//!
//! This module contains the crawl loop that stitches the pipeline together:
//! - Generating page URLs for each seed
//! - Rate-limited, retried fetching of each page
//! - Extracting listing records and accumulating them up to the result cap
//! - A final order-preserving deduplication pass

use crate::crawler::fetcher::PageSource;
use crate::crawler::pagination::{page_urls, DEFAULT_PAGE_SIZE};
use crate::crawler::rate_limiter::RateLimiter;
use crate::crawler::retry::{fetch_with_retry, RetryPolicy};
use crate::extract::extract_listings;
use crate::output::CrawlStats;
use crate::record::ListingRecord;
use crate::PaginationError;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Limits and schedules for one crawl
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSettings {
    /// Global cap on records, across all seeds
    pub max_results: usize,

    /// Results per page used for pagination offsets
    pub page_size: usize,

    /// Optional cap on pages per seed
    pub max_pages: Option<usize>,

    /// Retry schedule for each page fetch
    pub retry: RetryPolicy,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_results: 100,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Deduplicated records, truncated to the result cap
    pub records: Vec<ListingRecord>,

    /// Counters collected along the way
    pub stats: CrawlStats,
}

/// Drives the crawl over a set of seed URLs
///
/// Fetches are made one at a time. The rate limiter is held behind an `Arc`
/// so several crawlers can share one gate.
pub struct Crawler<S> {
    source: S,
    limiter: Arc<RateLimiter>,
    settings: CrawlSettings,
    cancelled: Arc<AtomicBool>,
}

impl<S: PageSource> Crawler<S> {
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `source` - Fetch capability for page URLs
    /// * `limiter` - Shared rate limiter gating every fetch
    /// * `settings` - Result cap, pagination and retry settings
    pub fn new(source: S, limiter: Arc<RateLimiter>, settings: CrawlSettings) -> Self {
        Self {
            source,
            limiter,
            settings,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a flag that stops the crawl before the next page fetch when set
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Runs the crawl
    ///
    /// For each seed in order: paginate, then for each page acquire the rate
    /// limiter, fetch with retry, extract and accumulate, until the page
    /// sequence ends or `max_results` records are held. A page whose fetch
    /// fails after all retries is skipped. After the last seed the records
    /// are deduplicated and truncated to `max_results`.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Records and counters (possibly empty)
    /// * `Err(HarvestError::Pagination)` - The page size is not positive
    pub async fn run(&self, seeds: &[String]) -> crate::Result<CrawlReport> {
        let max_results = self.settings.max_results;
        if self.settings.page_size == 0 {
            return Err(PaginationError::InvalidArgument(
                "page_size must be positive".to_string(),
            )
            .into());
        }

        let mut stats = CrawlStats {
            seeds: seeds.len(),
            ..CrawlStats::default()
        };
        let mut accumulated: Vec<ListingRecord> = Vec::new();

        'seeds: for seed in seeds {
            if accumulated.len() >= max_results {
                break;
            }

            let pages = match page_urls(
                seed,
                max_results,
                self.settings.page_size,
                self.settings.max_pages,
            ) {
                Ok(pages) => pages,
                Err(e) => {
                    tracing::warn!("Skipping seed {}: {}", seed, e);
                    stats.seeds_skipped += 1;
                    continue;
                }
            };

            tracing::info!("Crawling seed {} ({} pages)", seed, pages.len());

            for page_url in pages {
                if accumulated.len() >= max_results {
                    break;
                }

                if self.cancelled.load(Ordering::SeqCst) {
                    tracing::info!("Crawl cancelled before fetching {}", page_url);
                    stats.cancelled = true;
                    break 'seeds;
                }

                self.limiter.acquire().await;
                stats.pages_attempted += 1;

                let html = match fetch_with_retry(&self.settings.retry, &page_url, || {
                    self.source.fetch(&page_url)
                })
                .await
                {
                    Some(html) => html,
                    None => {
                        stats.pages_failed += 1;
                        continue;
                    }
                };
                stats.pages_fetched += 1;

                let records = extract_listings(&html, &page_url);
                tracing::debug!("Extracted {} records from {}", records.len(), page_url);
                if records.is_empty() {
                    stats.pages_empty += 1;
                }
                stats.records_extracted += records.len();

                let room = max_results - accumulated.len();
                accumulated.extend(records.into_iter().take(room));
            }
        }

        let before = accumulated.len();
        let mut records = dedup_records(accumulated);
        stats.duplicates_dropped = before - records.len();
        records.truncate(max_results);
        stats.records_kept = records.len();

        tracing::info!(
            "Crawl finished: {} pages fetched, {} failed, {} records kept ({} duplicates dropped)",
            stats.pages_fetched,
            stats.pages_failed,
            stats.records_kept,
            stats.duplicates_dropped
        );

        Ok(CrawlReport { records, stats })
    }
}

/// Removes repeated listings, keeping the first occurrence of each
///
/// Identity is the job key when present, else the link. Records with
/// neither are always kept.
///
/// # Example
///
/// ```
/// use job_harvest::crawler::dedup_records;
/// use job_harvest::extract::extract_listings;
///
/// let html = r#"
///     <div class="result"><a href="/viewjob?jk=a1">A</a></div>
///     <div class="result"><a href="/rc/clk?jk=a1">A again</a></div>"#;
/// let records = dedup_records(extract_listings(html, "https://example.com"));
/// assert_eq!(records.len(), 1);
/// ```
pub fn dedup_records(records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    let mut seen: HashSet<String> = HashSet::new();

    records
        .into_iter()
        .filter(|record| match record.dedup_key() {
            Some(key) => seen.insert(key.to_string()),
            None => true,
        })
        .collect()
}
