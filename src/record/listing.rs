use crate::record::SalaryRange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Work arrangement inferred from job-type tags and the snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteWorkModel {
    Remote,
    Hybrid,
    RemoteHybrid,
    Onsite,
}

impl RemoteWorkModel {
    /// Returns the uppercase name used in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "REMOTE",
            Self::Hybrid => "HYBRID",
            Self::RemoteHybrid => "REMOTE_HYBRID",
            Self::Onsite => "ONSITE",
        }
    }

    /// Classifies free text by its remote/hybrid/onsite keywords
    ///
    /// The combined remote+hybrid check runs before the single-keyword checks.
    pub fn classify(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        let remote = lowered.contains("remote");
        let hybrid = lowered.contains("hybrid");

        if remote && hybrid {
            Some(Self::RemoteHybrid)
        } else if remote {
            Some(Self::Remote)
        } else if hybrid {
            Some(Self::Hybrid)
        } else if lowered.contains("onsite") || lowered.contains("on-site") {
            Some(Self::Onsite)
        } else {
            None
        }
    }
}

impl fmt::Display for RemoteWorkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A taxonomy attribute attached to a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyTag {
    pub label: String,
    pub tier: String,
}

/// One job posting extracted from a search-results card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub company: Option<String>,
    pub company_logo_url: Option<String>,
    pub company_header_image_url: Option<String>,
    pub company_overview_link: Option<String>,
    pub company_rating: Option<f64>,
    pub company_review_count: Option<u64>,

    /// Same value as `title`
    pub display_title: Option<String>,
    pub title: Option<String>,
    pub normalized_title: Option<String>,

    pub formatted_location: Option<String>,
    pub snippet: Option<String>,

    /// Same value as `view_job_link`
    pub link: Option<String>,
    pub view_job_link: Option<String>,

    /// Site identity token from the `jk` query parameter
    pub job_key: Option<String>,

    pub job_type_tags: Vec<String>,
    pub sponsored: bool,
    pub is_new: bool,

    /// Site phrasing such as "3 days ago", kept verbatim
    pub relative_time: Option<String>,
    pub remote_work_model: Option<RemoteWorkModel>,

    pub salary_snippet_text: Option<String>,
    pub extracted_salary: Option<SalaryRange>,
    pub taxonomy_tags: Option<Vec<TaxonomyTag>>,

    pub expired: bool,
    pub location_count: u32,

    /// Extraction time, not the posting's publish date
    pub published_at_iso: DateTime<Utc>,
    pub source_url: String,
}

impl ListingRecord {
    /// Returns the identity used for deduplication
    ///
    /// The job key when present, otherwise the listing link. Records with
    /// neither have no identity and are never collapsed.
    pub fn dedup_key(&self) -> Option<&str> {
        self.job_key.as_deref().or(self.link.as_deref())
    }
}
