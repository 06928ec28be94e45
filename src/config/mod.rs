//! Configuration module for Job-Harvest
//!
//! This module handles loading, parsing, and validating TOML settings files,
//! and resolving the seed URLs a run starts from.
//!
//! # Example
//!
//! ```no_run
//! use job_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("job-harvest.toml")).unwrap();
//! println!("Crawler will collect up to {} listings", config.crawler.max_results);
//! ```

mod parser;
mod seeds;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, RetryConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config, DEFAULT_CONFIG_PATH};
pub use seeds::{normalize_seed, parse_inputs, resolve_seeds, DEFAULT_INPUTS_PATH};
pub use validation::validate;
