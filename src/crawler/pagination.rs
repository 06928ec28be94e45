//! Page URL sequencing
//!
//! Search results are paginated through a `start` query parameter holding the
//! offset of the first result on the page.

use crate::PaginationError;
use url::Url;

/// Results per page assumed when computing offsets
pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Query parameter carrying the result offset
const START_PARAM: &str = "start";

/// Lazy, finite sequence of page URLs for one seed
///
/// Cloning yields an independent sequence positioned at the same page.
#[derive(Debug, Clone)]
pub struct PageUrls {
    base: Url,
    page_size: usize,
    next_page: usize,
    num_pages: usize,
}

impl Iterator for PageUrls {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_page >= self.num_pages {
            return None;
        }

        let start = self.next_page * self.page_size;
        self.next_page += 1;
        Some(with_start(&self.base, start))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_pages - self.next_page;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PageUrls {}

/// Builds the page URL sequence for a seed
///
/// Yields `ceil(max_results / page_size)` URLs (clamped to `max_pages`), where
/// page `i` carries `start = i * page_size`. Every other query parameter and
/// the path are kept as they are.
///
/// # Arguments
///
/// * `base_url` - The seed search URL
/// * `max_results` - Number of results wanted; zero yields no pages
/// * `page_size` - Results per page; must be positive
/// * `max_pages` - Optional hard cap on the number of pages
///
/// # Returns
///
/// * `Ok(PageUrls)` - The page sequence
/// * `Err(PaginationError::InvalidArgument)` - Zero page size or unparsable base URL
///
/// # Example
///
/// ```
/// use job_harvest::crawler::page_urls;
///
/// let pages: Vec<String> = page_urls("https://example.com/jobs?q=rust", 40, 15, None)
///     .unwrap()
///     .collect();
/// assert_eq!(pages, vec![
///     "https://example.com/jobs?q=rust&start=0",
///     "https://example.com/jobs?q=rust&start=15",
///     "https://example.com/jobs?q=rust&start=30",
/// ]);
/// ```
pub fn page_urls(
    base_url: &str,
    max_results: usize,
    page_size: usize,
    max_pages: Option<usize>,
) -> Result<PageUrls, PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::InvalidArgument(
            "page_size must be positive".to_string(),
        ));
    }

    let base = Url::parse(base_url.trim()).map_err(|e| {
        PaginationError::InvalidArgument(format!("invalid base URL '{}': {}", base_url, e))
    })?;

    let mut num_pages = max_results.div_ceil(page_size);
    if let Some(cap) = max_pages {
        num_pages = num_pages.min(cap);
    }

    Ok(PageUrls {
        base,
        page_size,
        next_page: 0,
        num_pages,
    })
}

/// Returns `base` with its `start` parameter set to `start`
///
/// An existing `start` keeps its position; otherwise it is appended.
fn with_start(base: &Url, start: usize) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;

    for (key, value) in base.query_pairs() {
        if key == START_PARAM {
            if !replaced {
                pairs.push((key.into_owned(), start.to_string()));
                replaced = true;
            }
        } else {
            pairs.push((key.into_owned(), value.into_owned()));
        }
    }

    if !replaced {
        pairs.push((START_PARAM.to_string(), start.to_string()));
    }

    let mut url = base.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}
