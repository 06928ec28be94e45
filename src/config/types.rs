use crate::crawler::{CrawlSettings, RetryPolicy, DEFAULT_PAGE_SIZE};
use crate::output::OutputFormat;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Main configuration structure for Job-Harvest
///
/// Every section and key is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub retry: RetryConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Returns the crawl settings derived from this configuration
    pub fn crawl_settings(&self) -> CrawlSettings {
        CrawlSettings {
            max_results: self.crawler.max_results,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: self.crawler.max_pages,
            retry: self.retry.policy(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of listings to collect across all seeds
    #[serde(rename = "max-results")]
    pub max_results: usize,

    /// Outbound request budget
    #[serde(rename = "requests-per-minute")]
    pub requests_per_minute: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Optional cap on pages per seed; derived from max-results when absent
    #[serde(rename = "max-pages")]
    pub max_pages: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            requests_per_minute: 30,
            timeout_seconds: 20,
            max_pages: None,
        }
    }
}

/// Retry schedule for failed page fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    #[serde(rename = "initial-delay-ms")]
    pub initial_delay_ms: u64,

    #[serde(rename = "backoff-factor")]
    pub backoff_factor: f64,

    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,
}

impl RetryConfig {
    /// Converts to the policy used by the fetcher
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            backoff_factor: self.backoff_factor,
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1500,
            backoff_factor: 2.0,
            max_delay_ms: 8000,
        }
    }
}

/// Request identity configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    pub header: String,

    /// Value of the Accept-Language header
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Export format
    pub format: OutputFormat,

    /// Path of the exported file
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            path: PathBuf::from("output.json"),
        }
    }
}
