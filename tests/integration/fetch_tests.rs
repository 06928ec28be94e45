//! Integration tests for page fetching
//!
//! These tests use wiremock to serve pages and check status handling,
//! request headers and retry behavior against a real HTTP client.

use job_harvest::config::UserAgentConfig;
use job_harvest::crawler::{fetch_with_retry, HttpPageSource, PageSource, RetryPolicy};
use job_harvest::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_source() -> HttpPageSource {
    let user_agent = UserAgentConfig {
        header: "JobHarvestTest/1.0".to_string(),
        accept_language: "en-GB".to_string(),
    };
    HttpPageSource::new(&user_agent, Duration::from_secs(5)).expect("client builds")
}

fn quick_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::from_millis(10),
        backoff_factor: 2.0,
        max_delay: Duration::from_millis(40),
    }
}

#[tokio::test]
async fn test_fetch_success_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(header("user-agent", "JobHarvestTest/1.0"))
        .and(header("accept-language", "en-GB"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = test_source()
        .fetch(&format!("{}/jobs?q=rust", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let result = test_source()
        .fetch(&format!("{}/missing", mock_server.uri()))
        .await;
    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_retry_recovers_after_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&mock_server)
        .await;

    let source = test_source();
    let url = format!("{}/flaky", mock_server.uri());
    let body = fetch_with_retry(&quick_policy(3), &url, || source.fetch(&url)).await;

    assert_eq!(body.as_deref(), Some("recovered"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_retry_gives_up_after_max_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let source = test_source();
    let url = format!("{}/down", mock_server.uri());
    let body = fetch_with_retry(&quick_policy(3), &url, || source.fetch(&url)).await;

    assert!(body.is_none());
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = test_source()
        .fetch(&format!("http://127.0.0.1:{}/gone", port))
        .await;
    assert!(matches!(result, Err(FetchError::Http { .. })));
}
