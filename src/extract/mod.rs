//! Extraction of listing records from HTML
//!
//! This module contains the stateless transforms of the pipeline:
//! - Card and field extraction with selector fallback chains
//! - Salary text parsing
//! - Title normalization

mod listing;
pub mod rules;
mod salary;
mod title;

pub use listing::{extract_job_key, extract_listings, extract_listings_at};
pub use salary::{detect_cadence, detect_currency, parse_salary_text};
pub use title::normalize_title;
