//! Selector fallback tables
//!
//! Every card field is described by an ordered list of CSS selectors. Probing a
//! field walks the list and the first selector that yields a non-empty value
//! decides it. Keeping the chains as data makes the fallback order easy to
//! inspect and to test in isolation.

use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

/// How a value is read from a matched element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    /// Whitespace-collapsed text content
    Text,
    /// Trimmed value of the named attribute
    Attr(&'static str),
}

/// Ordered fallback chain for one field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub selectors: &'static [&'static str],
    pub read: Read,
}

pub const TITLE: FieldRule = FieldRule {
    field: "title",
    selectors: &["[data-testid='title']", "h2.jobTitle"],
    read: Read::Text,
};

pub const LOCATION: FieldRule = FieldRule {
    field: "formattedLocation",
    selectors: &["[data-testid='text-location']", ".companyLocation"],
    read: Read::Text,
};

pub const SNIPPET: FieldRule = FieldRule {
    field: "snippet",
    selectors: &["[data-testid='job-snippet']", ".job-snippet"],
    read: Read::Text,
};

pub const LINK: FieldRule = FieldRule {
    field: "link",
    selectors: &[
        "a[href*='/rc/clk']",
        "a[href*='/pagead/']",
        "a[href*='/viewjob']",
    ],
    read: Read::Attr("href"),
};

pub const COMPANY: FieldRule = FieldRule {
    field: "company",
    selectors: &["[data-testid='company-name']", ".companyName"],
    read: Read::Text,
};

pub const COMPANY_RATING: FieldRule = FieldRule {
    field: "companyRating",
    selectors: &["[data-testid='company-rating']", ".ratingNumber"],
    read: Read::Text,
};

pub const COMPANY_REVIEW_COUNT: FieldRule = FieldRule {
    field: "companyReviewCount",
    selectors: &["[data-testid='company-review-count']", ".ratingCount"],
    read: Read::Text,
};

pub const COMPANY_LOGO: FieldRule = FieldRule {
    field: "companyLogoUrl",
    selectors: &["img[alt*='logo' i]"],
    read: Read::Attr("src"),
};

pub const COMPANY_HEADER_IMAGE: FieldRule = FieldRule {
    field: "companyHeaderImageUrl",
    selectors: &["img[alt*='header' i]"],
    read: Read::Attr("src"),
};

pub const COMPANY_OVERVIEW_LINK: FieldRule = FieldRule {
    field: "companyOverviewLink",
    selectors: &["a[href*='/cmp/']"],
    read: Read::Attr("href"),
};

pub const RELATIVE_TIME: FieldRule = FieldRule {
    field: "relativeTime",
    selectors: &["[data-testid='myJobsStateDate']", ".date"],
    read: Read::Text,
};

pub const SALARY_SNIPPET: FieldRule = FieldRule {
    field: "salarySnippetText",
    selectors: &[
        "[data-testid='attribute-salary']",
        ".salary-snippet-container",
        ".salary-snippet",
    ],
    read: Read::Text,
};

pub const JOB_TYPE_TAGS: FieldRule = FieldRule {
    field: "jobTypeTags",
    selectors: &["[data-testid='attribute-snippet'] span", ".attribute_snippet"],
    read: Read::Text,
};

pub const TAXONOMY_TAGS: FieldRule = FieldRule {
    field: "taxonomyTags",
    selectors: &["[data-testid='taxonomy-item']", ".taxo"],
    read: Read::Text,
};

pub const SPONSORED: FieldRule = FieldRule {
    field: "sponsored",
    selectors: &["[data-testid='sponsored-label']", ".sponsoredGray"],
    read: Read::Text,
};

pub const NEW_MARKER: FieldRule = FieldRule {
    field: "isNew",
    selectors: &["[aria-label*='new' i]", ".new"],
    read: Read::Text,
};

/// Result containers recognized on known layouts
pub const PRIMARY_CARDS: &str =
    "[data-testid='result'], .result, .jobsearch-SerpJobCard";

/// Generic containers used when no known card matches
pub const FALLBACK_CARDS: &str = "li, article";

/// A [`FieldRule`] with its selectors parsed
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: FieldRule,
    selectors: Vec<Selector>,
}

impl CompiledRule {
    /// Parses the rule's selectors, dropping any that fail to parse
    pub fn compile(rule: FieldRule) -> Self {
        let selectors = rule
            .selectors
            .iter()
            .filter_map(|css| match Selector::parse(css) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    tracing::warn!("Skipping selector {:?} for {}: {:?}", css, rule.field, e);
                    None
                }
            })
            .collect();

        Self { rule, selectors }
    }

    /// Returns the first non-empty value along the fallback chain
    pub fn probe(&self, card: ElementRef<'_>) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            card.select(selector)
                .find_map(|element| read_value(element, self.rule.read))
        })
    }

    /// Returns all non-empty values for the first selector that yields any
    pub fn probe_all(&self, card: ElementRef<'_>) -> Vec<String> {
        self.selectors
            .iter()
            .map(|selector| {
                card.select(selector)
                    .filter_map(|element| read_value(element, self.rule.read))
                    .collect::<Vec<_>>()
            })
            .find(|values| !values.is_empty())
            .unwrap_or_default()
    }

    /// Returns true if any selector in the chain matches an element
    pub fn is_present(&self, card: ElementRef<'_>) -> bool {
        self.selectors
            .iter()
            .any(|selector| card.select(selector).next().is_some())
    }
}

/// Compiled rules for every card field
#[derive(Debug)]
pub struct RuleSet {
    pub title: CompiledRule,
    pub location: CompiledRule,
    pub snippet: CompiledRule,
    pub link: CompiledRule,
    pub company: CompiledRule,
    pub company_rating: CompiledRule,
    pub company_review_count: CompiledRule,
    pub company_logo: CompiledRule,
    pub company_header_image: CompiledRule,
    pub company_overview_link: CompiledRule,
    pub relative_time: CompiledRule,
    pub salary_snippet: CompiledRule,
    pub job_type_tags: CompiledRule,
    pub taxonomy_tags: CompiledRule,
    pub sponsored: CompiledRule,
    pub new_marker: CompiledRule,
    pub primary_cards: Option<Selector>,
    pub fallback_cards: Option<Selector>,
}

impl RuleSet {
    fn compile() -> Self {
        Self {
            title: CompiledRule::compile(TITLE),
            location: CompiledRule::compile(LOCATION),
            snippet: CompiledRule::compile(SNIPPET),
            link: CompiledRule::compile(LINK),
            company: CompiledRule::compile(COMPANY),
            company_rating: CompiledRule::compile(COMPANY_RATING),
            company_review_count: CompiledRule::compile(COMPANY_REVIEW_COUNT),
            company_logo: CompiledRule::compile(COMPANY_LOGO),
            company_header_image: CompiledRule::compile(COMPANY_HEADER_IMAGE),
            company_overview_link: CompiledRule::compile(COMPANY_OVERVIEW_LINK),
            relative_time: CompiledRule::compile(RELATIVE_TIME),
            salary_snippet: CompiledRule::compile(SALARY_SNIPPET),
            job_type_tags: CompiledRule::compile(JOB_TYPE_TAGS),
            taxonomy_tags: CompiledRule::compile(TAXONOMY_TAGS),
            sponsored: CompiledRule::compile(SPONSORED),
            new_marker: CompiledRule::compile(NEW_MARKER),
            primary_cards: Selector::parse(PRIMARY_CARDS).ok(),
            fallback_cards: Selector::parse(FALLBACK_CARDS).ok(),
        }
    }
}

/// Returns the process-wide compiled rule set
pub fn rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(RuleSet::compile)
}

fn read_value(element: ElementRef<'_>, read: Read) -> Option<String> {
    let value = match read {
        Read::Text => collapse_whitespace(&element.text().collect::<String>()),
        Read::Attr(name) => element.value().attr(name)?.trim().to_string(),
    };

    Some(value).filter(|v| !v.is_empty())
}

/// Collapses runs of whitespace to single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn fragment(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    fn root(doc: &Html) -> ElementRef<'_> {
        doc.root_element()
    }

    #[test]
    fn test_all_selectors_parse() {
        for rule in [
            TITLE,
            LOCATION,
            SNIPPET,
            LINK,
            COMPANY,
            COMPANY_RATING,
            COMPANY_REVIEW_COUNT,
            COMPANY_LOGO,
            COMPANY_HEADER_IMAGE,
            COMPANY_OVERVIEW_LINK,
            RELATIVE_TIME,
            SALARY_SNIPPET,
            JOB_TYPE_TAGS,
            TAXONOMY_TAGS,
            SPONSORED,
            NEW_MARKER,
        ] {
            let compiled = CompiledRule::compile(rule);
            assert_eq!(
                compiled.selectors.len(),
                rule.selectors.len(),
                "selector failed to parse for {}",
                rule.field
            );
        }
        assert!(rules().primary_cards.is_some());
        assert!(rules().fallback_cards.is_some());
    }

    #[test]
    fn test_probe_prefers_earlier_selector() {
        // The h2 appears first in the document but the test id ranks higher
        let doc = fragment(
            r#"<div><h2 class="jobTitle">Fallback Title</h2>
               <span data-testid="title">Primary Title</span></div>"#,
        );
        let title = CompiledRule::compile(TITLE).probe(root(&doc));
        assert_eq!(title.as_deref(), Some("Primary Title"));
    }

    #[test]
    fn test_probe_falls_through_empty_match() {
        let doc = fragment(
            r#"<div><span data-testid="title">   </span>
               <h2 class="jobTitle">Data Engineer</h2></div>"#,
        );
        let title = CompiledRule::compile(TITLE).probe(root(&doc));
        assert_eq!(title.as_deref(), Some("Data Engineer"));
    }

    #[test]
    fn test_probe_reads_attribute() {
        let doc = fragment(
            r#"<div><a href="/about">About</a>
               <a href=" /viewjob?jk=abc123 ">View</a></div>"#,
        );
        let link = CompiledRule::compile(LINK).probe(root(&doc));
        assert_eq!(link.as_deref(), Some("/viewjob?jk=abc123"));
    }

    #[test]
    fn test_link_priority_over_document_order() {
        let doc = fragment(
            r#"<div><a href="/viewjob?jk=late">View</a>
               <a href="/rc/clk?jk=early">Click</a></div>"#,
        );
        let link = CompiledRule::compile(LINK).probe(root(&doc));
        assert_eq!(link.as_deref(), Some("/rc/clk?jk=early"));
    }

    #[test]
    fn test_case_insensitive_attribute_match() {
        let doc = fragment(r#"<div><img alt="Company LOGO" src="/logo.png"></div>"#);
        let logo = CompiledRule::compile(COMPANY_LOGO).probe(root(&doc));
        assert_eq!(logo.as_deref(), Some("/logo.png"));
    }

    #[test]
    fn test_probe_all_collects_in_document_order() {
        let doc = fragment(
            r#"<div><span data-testid="attribute-snippet">
               <span>Full-time</span><span> Remote </span><span></span></span></div>"#,
        );
        let tags = CompiledRule::compile(JOB_TYPE_TAGS).probe_all(root(&doc));
        assert_eq!(tags, vec!["Full-time", "Remote"]);
    }

    #[test]
    fn test_is_present() {
        let doc = fragment(r#"<div><span class="sponsoredGray">Sponsored</span></div>"#);
        assert!(CompiledRule::compile(SPONSORED).is_present(root(&doc)));
        assert!(!CompiledRule::compile(NEW_MARKER).is_present(root(&doc)));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  New \n\t York,   NY "), "New York, NY");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
