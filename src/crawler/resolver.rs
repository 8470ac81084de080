//! First-article resolution
//!
//! The page locator redirects to the page's first article. The article ID is
//! the trailing integer segment of the final URL.

use crate::crawler::fetcher::{fetch_url, FetchResult, RetryPolicy};
use crate::crawler::session::Session;
use crate::crawler::{ArticleId, CrawlTarget};
use crate::HarvestError;

/// Resolves the first article ID of a page
///
/// Fails with `HarvestError::Resolution` when the page locator cannot be
/// fetched or the final URL does not end in an integer. There is no fallback
/// and no transport retry.
pub async fn resolve_first_id(
    session: &mut Session,
    target: &CrawlTarget,
) -> Result<ArticleId, HarvestError> {
    let url = session.locators().page_url(target);

    // Page locators are never resent, so a run sends at most one per page
    session.throttle().wait().await;
    let result = fetch_url(session.client(), &url, &RetryPolicy::none()).await;
    session.throttle().mark();

    let reason = match result {
        FetchResult::Success { final_url, .. } => {
            return match parse_trailing_id(final_url.as_str()) {
                Some(id) => {
                    tracing::debug!(
                        "Page {} redirected to {}, first article {}",
                        target.page,
                        final_url,
                        id
                    );
                    Ok(id)
                }
                None => Err(HarvestError::Resolution {
                    url,
                    reason: format!("no trailing article id in {}", final_url),
                }),
            };
        }
        FetchResult::NotFound => "HTTP 404".to_string(),
        FetchResult::HttpError { status_code } => format!("HTTP {}", status_code),
        FetchResult::NetworkError { error } => error.to_string(),
    };

    Err(HarvestError::Resolution { url, reason })
}

/// Extracts the trailing `/<digits>` of a URL
///
/// # Example
///
/// ```
/// use epaper_harvest::crawler::parse_trailing_id;
///
/// assert_eq!(parse_trailing_id("https://x/view_article/a/01-01-2025/77/4213"), Some(4213));
/// assert_eq!(parse_trailing_id("https://x/home"), None);
/// ```
pub fn parse_trailing_id(url: &str) -> Option<ArticleId> {
    let (_, last) = url.rsplit_once('/')?;
    if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    last.parse().ok()
}
