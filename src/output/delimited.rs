//! Delimited-text export (CSV and TSV)
//!
//! Records are flattened through a fixed list of dotted column paths. Nested
//! values use the path of their field (`extractedSalary.min`), sequences are
//! joined with `|`, and absent values are written as empty cells.

use crate::record::ListingRecord;
use crate::OutputError;
use std::io::Write;

/// Column order of delimited exports
pub const COLUMNS: &[&str] = &[
    "jobKey",
    "title",
    "normalizedTitle",
    "displayTitle",
    "company",
    "companyRating",
    "companyReviewCount",
    "companyLogoUrl",
    "companyHeaderImageUrl",
    "companyOverviewLink",
    "formattedLocation",
    "locationCount",
    "remoteWorkModel",
    "jobTypeTags",
    "salarySnippetText",
    "extractedSalary.min",
    "extractedSalary.max",
    "extractedSalary.cadence",
    "extractedSalary.currency",
    "taxonomyTags.label",
    "snippet",
    "relativeTime",
    "sponsored",
    "isNew",
    "expired",
    "link",
    "viewJobLink",
    "publishedAtIso",
    "sourceUrl",
];

const SEQUENCE_SEPARATOR: &str = "|";

/// Reads one column of a record as cell text
///
/// Unknown columns project to an empty cell.
pub fn project(record: &ListingRecord, column: &str) -> String {
    let salary = record.extracted_salary.as_ref();

    match column {
        "jobKey" => text(&record.job_key),
        "title" => text(&record.title),
        "normalizedTitle" => text(&record.normalized_title),
        "displayTitle" => text(&record.display_title),
        "company" => text(&record.company),
        "companyRating" => number(record.company_rating),
        "companyReviewCount" => record
            .company_review_count
            .map(|count| count.to_string())
            .unwrap_or_default(),
        "companyLogoUrl" => text(&record.company_logo_url),
        "companyHeaderImageUrl" => text(&record.company_header_image_url),
        "companyOverviewLink" => text(&record.company_overview_link),
        "formattedLocation" => text(&record.formatted_location),
        "locationCount" => record.location_count.to_string(),
        "remoteWorkModel" => record
            .remote_work_model
            .map(|model| model.as_str().to_string())
            .unwrap_or_default(),
        "jobTypeTags" => record.job_type_tags.join(SEQUENCE_SEPARATOR),
        "salarySnippetText" => text(&record.salary_snippet_text),
        "extractedSalary.min" => number(salary.map(|s| s.min)),
        "extractedSalary.max" => number(salary.map(|s| s.max)),
        "extractedSalary.cadence" => salary
            .and_then(|s| s.cadence)
            .map(|cadence| cadence.as_str().to_string())
            .unwrap_or_default(),
        "extractedSalary.currency" => salary
            .and_then(|s| s.currency.clone())
            .unwrap_or_default(),
        "taxonomyTags.label" => record
            .taxonomy_tags
            .as_ref()
            .map(|tags| {
                tags.iter()
                    .map(|tag| tag.label.as_str())
                    .collect::<Vec<_>>()
                    .join(SEQUENCE_SEPARATOR)
            })
            .unwrap_or_default(),
        "snippet" => text(&record.snippet),
        "relativeTime" => text(&record.relative_time),
        "sponsored" => record.sponsored.to_string(),
        "isNew" => record.is_new.to_string(),
        "expired" => record.expired.to_string(),
        "link" => text(&record.link),
        "viewJobLink" => text(&record.view_job_link),
        "publishedAtIso" => record.published_at_iso.to_rfc3339(),
        "sourceUrl" => record.source_url.clone(),
        _ => String::new(),
    }
}

/// Writes records as delimited text with a header row
///
/// # Arguments
///
/// * `writer` - Destination
/// * `records` - Records to export, in order
/// * `delimiter` - `b','` for CSV, `b'\t'` for TSV
pub fn write_delimited<W: Write>(
    writer: W,
    records: &[ListingRecord],
    delimiter: u8,
) -> Result<(), OutputError> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(COLUMNS)?;
    for record in records {
        out.write_record(COLUMNS.iter().map(|column| project(record, column)))?;
    }
    out.flush()?;

    Ok(())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}
