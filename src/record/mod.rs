//! Structured listing records
//!
//! A [`ListingRecord`] is created once per card by the extractor, never mutated
//! afterwards, and handed to the exporters at the end of a crawl.

mod listing;
mod salary;

pub use listing::{ListingRecord, RemoteWorkModel, TaxonomyTag};
pub use salary::{Cadence, SalaryRange};
