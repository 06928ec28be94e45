//! Listing extraction from search-result pages
//!
//! This module turns one HTML document into listing records:
//! - Locating result cards, with a generic fallback for unknown layouts
//! - Probing each field through its selector fallback chain
//! - Deriving the job key, work model, salary range and normalized title

use crate::extract::rules::{rules, RuleSet};
use crate::extract::salary::parse_salary_text;
use crate::extract::title::normalize_title;
use crate::record::{ListingRecord, RemoteWorkModel, TaxonomyTag};
use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::OnceLock;

/// Tier assigned to every taxonomy label found on a card
const TAXONOMY_TIER: &str = "tag";

fn job_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[?&]jk=([0-9a-zA-Z]+)").expect("job key pattern is valid"))
}

/// Extracts listing records from a search-results page
///
/// Never fails: a field that cannot be located is left absent and a card
/// with nothing recognizable still yields a (sparse) record.
///
/// # Card Selection
///
/// 1. Known result containers (`data-testid="result"`, `.result`, `.jobsearch-SerpJobCard`)
/// 2. If none match, every `li` and `article` element
///
/// # Arguments
///
/// * `html` - The page content
/// * `source_url` - The page URL, stamped on every record
///
/// # Example
///
/// ```
/// use job_harvest::extract::extract_listings;
///
/// let html = r#"<div data-testid="result">
///     <h2 class="jobTitle">Backend Engineer</h2>
///     <a href="/viewjob?jk=abc123">View</a>
/// </div>"#;
/// let records = extract_listings(html, "https://example.com/jobs");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].job_key.as_deref(), Some("abc123"));
/// ```
pub fn extract_listings(html: &str, source_url: &str) -> Vec<ListingRecord> {
    extract_listings_at(html, source_url, Utc::now())
}

/// Same as [`extract_listings`] with an explicit extraction timestamp
pub fn extract_listings_at(
    html: &str,
    source_url: &str,
    extracted_at: DateTime<Utc>,
) -> Vec<ListingRecord> {
    let document = Html::parse_document(html);
    let rules = rules();

    let cards = select_cards(&document, rules);
    tracing::debug!("Found {} candidate cards on {}", cards.len(), source_url);

    cards
        .into_iter()
        .map(|card| extract_card(card, rules, source_url, extracted_at))
        .collect()
}

/// Selects card elements, falling back to generic containers
fn select_cards<'a>(document: &'a Html, rules: &RuleSet) -> Vec<ElementRef<'a>> {
    let primary: Vec<_> = rules
        .primary_cards
        .as_ref()
        .map(|selector| document.select(selector).collect())
        .unwrap_or_default();

    if !primary.is_empty() {
        return primary;
    }

    rules
        .fallback_cards
        .as_ref()
        .map(|selector| document.select(selector).collect())
        .unwrap_or_default()
}

/// Builds one record from a card
fn extract_card(
    card: ElementRef<'_>,
    rules: &RuleSet,
    source_url: &str,
    extracted_at: DateTime<Utc>,
) -> ListingRecord {
    let title = rules.title.probe(card);
    let snippet = rules.snippet.probe(card);
    let link = rules.link.probe(card);
    let job_key = link.as_deref().and_then(extract_job_key);
    let job_type_tags = rules.job_type_tags.probe_all(card);

    let remote_work_model = {
        let mut tokens = job_type_tags.join(" ");
        if let Some(snippet) = &snippet {
            tokens.push(' ');
            tokens.push_str(snippet);
        }
        RemoteWorkModel::classify(&tokens)
    };

    let salary_snippet_text = rules.salary_snippet.probe(card);
    let extracted_salary = salary_snippet_text.as_deref().and_then(parse_salary_text);

    let taxonomy_labels = rules.taxonomy_tags.probe_all(card);
    let taxonomy_tags = if taxonomy_labels.is_empty() {
        None
    } else {
        Some(
            taxonomy_labels
                .into_iter()
                .map(|label| TaxonomyTag {
                    label,
                    tier: TAXONOMY_TIER.to_string(),
                })
                .collect(),
        )
    };

    ListingRecord {
        company: rules.company.probe(card),
        company_logo_url: rules.company_logo.probe(card),
        company_header_image_url: rules.company_header_image.probe(card),
        company_overview_link: rules.company_overview_link.probe(card),
        company_rating: rules.company_rating.probe(card).and_then(|r| parse_rating(&r)),
        company_review_count: rules
            .company_review_count
            .probe(card)
            .and_then(|c| parse_review_count(&c)),
        display_title: title.clone(),
        normalized_title: title.as_deref().map(normalize_title),
        title,
        formatted_location: rules.location.probe(card),
        snippet,
        view_job_link: link.clone(),
        link,
        job_key,
        job_type_tags,
        sponsored: rules.sponsored.is_present(card),
        is_new: rules.new_marker.is_present(card),
        relative_time: rules.relative_time.probe(card),
        remote_work_model,
        salary_snippet_text,
        extracted_salary,
        taxonomy_tags,
        expired: false,
        location_count: 1,
        published_at_iso: extracted_at,
        source_url: source_url.to_string(),
    }
}

/// Extracts the `jk` query parameter value from a listing link
///
/// # Example
///
/// ```
/// use job_harvest::extract::extract_job_key;
///
/// assert_eq!(extract_job_key("/viewjob?jk=abc123&from=serp").as_deref(), Some("abc123"));
/// assert_eq!(extract_job_key("/viewjob?id=abc123"), None);
/// ```
pub fn extract_job_key(link: &str) -> Option<String> {
    job_key_pattern()
        .captures(link)
        .map(|caps| caps[1].to_string())
}

fn parse_rating(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|r| r.is_finite())
}

fn parse_review_count(text: &str) -> Option<u64> {
    text.replace(',', "").parse::<u64>().ok()
}
