//! Integration tests for the crawler
//!
//! These tests use wiremock to serve paginated search results and test
//! the full crawl cycle end-to-end, plus a crawl over local files.

use job_harvest::config::{Config, UserAgentConfig};
use job_harvest::crawler::{crawl, CrawlSettings, Crawler, HttpPageSource, RateLimiter, RetryPolicy};
use job_harvest::{Cadence, RemoteWorkModel};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders one result card in the current markup
fn card(job_key: &str, title: &str, salary: &str) -> String {
    format!(
        r#"<div data-testid="result">
            <h2 data-testid="title">{title}</h2>
            <span data-testid="company-name">Acme Corp</span>
            <div data-testid="text-location">Austin, TX</div>
            <a href="/rc/clk?jk={job_key}&amp;from=serp">View</a>
            <div data-testid="attribute-salary">{salary}</div>
            <div data-testid="attribute-snippet"><span>Full-time</span><span>Remote</span></div>
        </div>"#
    )
}

fn page(cards: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", cards.join("\n"))
}

/// Creates a crawler with fast retries and a generous rate limit
fn create_test_crawler(max_results: usize, page_size: usize) -> Crawler<HttpPageSource> {
    let source = HttpPageSource::new(&UserAgentConfig::default(), Duration::from_secs(5))
        .expect("client builds");
    let limiter = Arc::new(RateLimiter::new(1000, Duration::from_secs(1)));
    let settings = CrawlSettings {
        max_results,
        page_size,
        max_pages: None,
        retry: RetryPolicy {
            max_attempts: 2,
            initial_delay: Duration::from_millis(10),
            backoff_factor: 2.0,
            max_delay: Duration::from_millis(20),
        },
    };
    Crawler::new(source, limiter, settings)
}

#[tokio::test]
async fn test_full_crawl_paginates_and_deduplicates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[
            card("a1", "Senior Software Developer", "$120,000 - $150,000 a year"),
            card("a2", "Rust Engineer", "$60 an hour"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[
            card("a2", "Rust Engineer", "$60 an hour"),
            card("a3", "Junior Developer", "Competitive"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(4, 2);
    let seed = format!("{}/jobs?q=rust", mock_server.uri());
    let report = crawler.run(&[seed.clone()]).await.unwrap();

    let keys: Vec<_> = report
        .records
        .iter()
        .map(|r| r.job_key.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(keys, vec!["a1", "a2", "a3"]);

    assert_eq!(report.stats.pages_attempted, 2);
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.records_extracted, 4);
    assert_eq!(report.stats.duplicates_dropped, 1);
    assert_eq!(report.stats.records_kept, 3);

    let first = &report.records[0];
    assert_eq!(first.normalized_title.as_deref(), Some("Sr Software Engineer"));
    assert_eq!(first.company.as_deref(), Some("Acme Corp"));
    assert_eq!(first.remote_work_model, Some(RemoteWorkModel::Remote));
    assert_eq!(first.source_url, format!("{}&start=0", seed));

    let salary = first.extracted_salary.as_ref().unwrap();
    assert_eq!(salary.min, 120000.0);
    assert_eq!(salary.max, 150000.0);
    assert_eq!(salary.cadence, Some(Cadence::Yearly));
    assert_eq!(salary.currency.as_deref(), Some("USD"));

    let unparsed = &report.records[2];
    assert_eq!(unparsed.salary_snippet_text.as_deref(), Some("Competitive"));
    assert!(unparsed.extracted_salary.is_none());
}

#[tokio::test]
async fn test_failed_page_is_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[card(
            "b1",
            "Data Engineer",
            "£40,000 a year",
        )])))
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(4, 2);
    let report = crawler
        .run(&[format!("{}/jobs?q=data", mock_server.uri())])
        .await
        .unwrap();

    assert_eq!(report.stats.pages_failed, 1);
    assert_eq!(report.stats.pages_fetched, 1);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].job_key.as_deref(), Some("b1"));
    assert_eq!(
        report.records[0]
            .extracted_salary
            .as_ref()
            .and_then(|s| s.currency.as_deref()),
        Some("GBP")
    );
}

#[tokio::test]
async fn test_result_cap_stops_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(&[
            card("c1", "Engineer", ""),
            card("c2", "Engineer II", ""),
            card("c3", "Engineer III", ""),
        ])))
        .mount(&mock_server)
        .await;

    let crawler = create_test_crawler(2, 2);
    let report = crawler
        .run(&[format!("{}/jobs", mock_server.uri())])
        .await
        .unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.stats.pages_attempted, 1);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_crawl_local_file_seed() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("results.html");
    std::fs::write(
        &file,
        page(&[
            card("d1", "Platform Engineer", "€55,000 - €65,000 per year"),
            card("d1", "Platform Engineer", "€55,000 - €65,000 per year"),
        ]),
    )
    .unwrap();

    let mut config = Config::default();
    config.crawler.max_results = 15;
    let seed = url::Url::from_file_path(&file).unwrap().to_string();

    let report = crawl(&config, &[seed]).await.unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.stats.duplicates_dropped, 1);
    let salary = report.records[0].extracted_salary.as_ref().unwrap();
    assert_eq!(salary.currency.as_deref(), Some("EUR"));
    assert_eq!(salary.min, 55000.0);
}
