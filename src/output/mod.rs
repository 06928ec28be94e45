//! Output module for exporting crawl results
//!
//! This module handles:
//! - Exporting listing records as JSON or delimited text
//! - Flattening nested records into dotted-path columns
//! - Recording and printing crawl statistics

mod delimited;
mod json;
pub mod stats;

pub use delimited::{project, write_delimited, COLUMNS};
pub use json::write_json;
pub use stats::{print_statistics, CrawlStats};

use crate::record::ListingRecord;
use crate::OutputError;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    /// Returns the lowercase name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exports records to a file in the given format
///
/// The parent directory is created if it does not exist. An empty record
/// list still produces a valid file.
///
/// # Arguments
///
/// * `records` - Records to export
/// * `format` - Export format
/// * `path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - The file was written
/// * `Err(OutputError)` - The file could not be created or written
pub fn export_records(
    records: &[ListingRecord],
    format: OutputFormat,
    path: &Path,
) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => write_json(writer, records)?,
        OutputFormat::Csv => write_delimited(writer, records, b',')?,
        OutputFormat::Tsv => write_delimited(writer, records, b'\t')?,
    }

    tracing::info!(
        "Exported {} listings as {} to {}",
        records.len(),
        format,
        path.display()
    );
    Ok(())
}
