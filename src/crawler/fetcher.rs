//! HTTP page fetcher
//!
//! Performs GET requests for page HTML with bounded retries and exponential
//! backoff. Only transient failures (timeout, connection problems, 5xx) are
//! retried; a 4xx or other terminal status fails immediately. Errors are
//! values: the walker decides whether a failed URL is skipped or, for the
//! seed page, domain-fatal.

use crate::config::CrawlConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Base delay for exponential backoff between retry attempts
const BACKOFF_BASE_MS: u64 = 500;

/// A terminal page fetch failure
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-retryable status (4xx, redirect dead ends)
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    /// Transient failures persisted through every allowed attempt
    #[error("retries exhausted for {url}: {last_error}")]
    RetriesExhausted { url: String, last_error: String },

    /// Non-retryable transport failure (TLS, malformed response, ...)
    #[error("request failed for {url}: {message}")]
    Transport { url: String, message: String },
}

/// Builds the shared crawl HTTP client
///
/// The per-request timeout and User-Agent come from configuration; redirects
/// follow reqwest's default policy. gzip/brotli are enabled since
/// manufacturer sites routinely compress their catalog pages.
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page's HTML with retry-on-transient semantics
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | HTTP 5xx | Retry with backoff, up to `fetch_retries` attempts |
/// | Timeout / connect error | Retry with backoff |
/// | HTTP 4xx | Immediate `HttpStatus` error |
/// | Other transport error | Immediate `Transport` error |
///
/// Backoff doubles per attempt starting at 500ms.
///
/// # Arguments
///
/// * `client` - The shared crawl HTTP client
/// * `url` - The URL to fetch
/// * `retries` - Maximum number of attempts
///
/// # Returns
///
/// * `Ok(String)` - The page body
/// * `Err(FetchError)` - A terminal failure; the caller skips the URL
pub async fn fetch_page(client: &Client, url: &Url, retries: u32) -> Result<String, FetchError> {
    let mut last_error = String::new();

    for attempt in 1..=retries.max(1) {
        if attempt > 1 {
            let backoff = Duration::from_millis(BACKOFF_BASE_MS * (1 << (attempt - 2)));
            tracing::debug!("retry {} for {} after {:?}", attempt, url, backoff);
            tokio::time::sleep(backoff).await;
        }

        match client.get(url.clone()).send().await {
            Ok(response) => {
                let status = response.status();

                if status.is_server_error() {
                    last_error = format!("HTTP {}", status.as_u16());
                    continue;
                }

                if !status.is_success() {
                    return Err(FetchError::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                match response.text().await {
                    Ok(body) => return Ok(body),
                    Err(e) => {
                        // Body read failures are usually connection drops.
                        last_error = e.to_string();
                        continue;
                    }
                }
            }
            Err(e) => {
                if e.is_timeout() || e.is_connect() {
                    last_error = e.to_string();
                    continue;
                }
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    Err(FetchError::RetriesExhausted {
        url: url.to_string(),
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> CrawlConfig {
        CrawlConfig {
            max_pages_per_domain: 500,
            politeness_delay_ms: 1000,
            fetch_retries: 3,
            fetch_timeout_secs: 30,
            max_concurrent_domains: 8,
            user_agent: "TestAgent/1.0".to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        assert!(build_http_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_4xx_is_terminal() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/missing"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .expect(1) // terminal: exactly one attempt, no retries
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let result = fetch_page(&client, &url, 3).await;

        assert!(matches!(
            result,
            Err(FetchError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_5xx_retries_then_exhausts() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/flaky"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let url = Url::parse(&format!("{}/flaky", server.uri())).unwrap();
        let result = fetch_page(&client, &url, 2).await;

        assert!(matches!(result, Err(FetchError::RetriesExhausted { .. })));
    }

    #[tokio::test]
    async fn test_fetch_5xx_then_success() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/recovering"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/recovering"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config()).unwrap();
        let url = Url::parse(&format!("{}/recovering", server.uri())).unwrap();
        let body = fetch_page(&client, &url, 3).await.unwrap();

        assert_eq!(body, "<html></html>");
    }
}
