//! Crawl statistics
//!
//! Counters gathered by the crawler over one run, and their console rendering.

use serde::Serialize;

/// Counters for a single crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStats {
    /// Seed URLs given to the crawl
    pub seeds: usize,

    /// Seeds that could not be paginated
    pub seeds_skipped: usize,

    /// Page fetches started
    pub pages_attempted: usize,

    /// Pages that returned content
    pub pages_fetched: usize,

    /// Pages that failed after every retry
    pub pages_failed: usize,

    /// Fetched pages that yielded no listings
    pub pages_empty: usize,

    /// Listings extracted before deduplication and truncation
    pub records_extracted: usize,

    /// Listings dropped as duplicates
    pub duplicates_dropped: usize,

    /// Listings in the final result
    pub records_kept: usize,

    /// Whether the crawl stopped on a cancellation request
    pub cancelled: bool,
}

impl CrawlStats {
    /// Share of attempted pages that returned content, as a percentage
    pub fn fetch_success_rate(&self) -> f64 {
        if self.pages_attempted == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / self.pages_attempted as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Seeds:");
    println!("  Given: {}", stats.seeds);
    if stats.seeds_skipped > 0 {
        println!("  Skipped: {}", stats.seeds_skipped);
    }
    println!();

    println!("Pages:");
    println!("  Attempted: {}", stats.pages_attempted);
    println!(
        "  Fetched: {} ({:.1}%)",
        stats.pages_fetched,
        stats.fetch_success_rate()
    );
    println!("  Failed: {}", stats.pages_failed);
    println!("  Without listings: {}", stats.pages_empty);
    println!();

    println!("Listings:");
    println!("  Extracted: {}", stats.records_extracted);
    println!("  Duplicates dropped: {}", stats.duplicates_dropped);
    println!("  Kept: {}", stats.records_kept);

    if stats.cancelled {
        println!();
        println!("Crawl was cancelled before completion.");
    }
}
