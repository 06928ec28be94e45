//! Job-Harvest: a resilient job-listing crawler
//!
//! This crate turns paginated search-result pages into structured, deduplicated
//! listing records, tolerating layout drift in the source markup.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Job-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No seed URLs could be resolved")]
    NoSeeds,
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
}

/// Failure of a single page fetch
///
/// These never abort a crawl: the retrying fetcher logs them and the page is dropped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Errors raised while building a page URL sequence
#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur while exporting records
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Job-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler};
pub use extract::{extract_listings, parse_salary_text};
pub use record::{Cadence, ListingRecord, RemoteWorkModel, SalaryRange, TaxonomyTag};
