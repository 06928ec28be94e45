//! Page fetching
//!
//! This module provides the fetch capability used by the crawler:
//! - Building the shared HTTP client with browser-like headers
//! - Reading `file://` URLs and bare filesystem paths from disk
//! - GET requests where only 2xx responses count as success

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Something that can produce the content of a page URL
pub trait PageSource {
    /// Fetches the page body, or reports why it could not
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Where a page URL points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLocation {
    /// A local file, from a `file://` URL or a bare path
    File(PathBuf),
    /// Anything else, fetched over the network
    Remote(String),
}

impl PageLocation {
    /// Classifies a page URL
    ///
    /// `file://` URLs map to their path (the query string is ignored, so
    /// paginated file URLs still resolve). Absolute paths and existing relative
    /// paths without a scheme are local files.
    pub fn classify(url: &str) -> Result<Self, FetchError> {
        if url.starts_with("file://") {
            let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
            let path = parsed
                .to_file_path()
                .map_err(|_| FetchError::InvalidUrl(format!("{}: not a local file path", url)))?;
            return Ok(Self::File(path));
        }

        if url.starts_with('/') || (!url.contains(':') && Path::new(url).exists()) {
            return Ok(Self::File(PathBuf::from(url)));
        }

        Ok(Self::Remote(url.to_string()))
    }
}

/// Builds an HTTP client with the configured identity
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig, timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    }

    Client::builder()
        .user_agent(config.header.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP or from the local filesystem
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Creates a source with a freshly built client
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, timeout)?,
        })
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })
    }
}

impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match PageLocation::classify(url)? {
            PageLocation::File(path) => read_local(&path).await,
            PageLocation::Remote(url) => self.fetch_remote(&url).await,
        }
    }
}

async fn read_local(path: &Path) -> Result<String, FetchError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })
}
