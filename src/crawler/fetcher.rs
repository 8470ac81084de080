//! HTTP fetcher implementation
//!
//! This module owns the transport boundary for the whole run:
//! - Building the shared HTTP client (headers, timeout, redirect policy)
//! - Classifying every response into a `FetchResult`
//! - Bounded retry with backoff for transport failures only

use crate::config::HttpConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
///
/// A 404 is an expected outcome on this site (article IDs have gaps), so it
/// gets its own variant instead of being folded into `HttpError`.
#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// Response body
        body: Vec<u8>,
    },

    /// HTTP 404
    NotFound,

    /// Any other non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection refused, timeout, truncated body, too many redirects
    NetworkError {
        /// The underlying error of the last attempt
        error: reqwest::Error,
    },
}

/// Retry schedule for transport failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub retries: u32,

    /// Delay before the first retry; doubled for each further retry
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
        }
    }

    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            retries: config.transport_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Builds the HTTP client shared by every request of a run
///
/// Redirects are followed automatically; the page locator relies on that to
/// land on the first article.
///
/// # Example
///
/// ```no_run
/// use epaper_harvest::config::HttpConfig;
/// use epaper_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    } else {
        tracing::warn!(
            "Ignoring invalid accept-language header value: {}",
            config.accept_language
        );
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.timeout())
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | `Success` |
/// | HTTP 404 | Immediate → `NotFound` |
/// | Other HTTP status | Immediate → `HttpError` |
/// | Timeout, connect or body error | Retry with backoff, then `NetworkError` |
pub async fn fetch_url(client: &Client, url: &str, retry: &RetryPolicy) -> FetchResult {
    let mut attempt = 0;
    loop {
        match fetch_once(client, url).await {
            FetchResult::NetworkError { error } if attempt < retry.retries => {
                let delay = retry.delay_for(attempt);
                attempt += 1;
                tracing::warn!(
                    "Transport failure for {} ({}), retry {}/{} in {:?}",
                    url,
                    error,
                    attempt,
                    retry.retries,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

/// A single attempt, no retry
async fn fetch_once(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(error) => return FetchResult::NetworkError { error },
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return FetchResult::NotFound;
    }
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            body: body.to_vec(),
        },
        Err(error) => FetchResult::NetworkError { error },
    }
}
