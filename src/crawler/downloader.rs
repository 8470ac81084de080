//! Image asset downloads

use crate::crawler::fetcher::{fetch_url, FetchResult, RetryPolicy};
use crate::HarvestError;
use reqwest::Client;

/// Downloads an asset and returns its bytes
///
/// Any non-2xx status or transport failure is reported as
/// `HarvestError::AssetFetch`. No content-type or size checks are made.
pub async fn download(
    client: &Client,
    url: &str,
    retry: &RetryPolicy,
) -> Result<Vec<u8>, HarvestError> {
    match fetch_url(client, url, retry).await {
        FetchResult::Success { body, .. } => Ok(body),
        FetchResult::NotFound => Err(HarvestError::AssetFetch {
            url: url.to_string(),
            status: Some(404),
        }),
        FetchResult::HttpError { status_code } => Err(HarvestError::AssetFetch {
            url: url.to_string(),
            status: Some(status_code),
        }),
        FetchResult::NetworkError { error } => {
            tracing::debug!("Transport failure downloading {}: {}", url, error);
            Err(HarvestError::AssetFetch {
                url: url.to_string(),
                status: None,
            })
        }
    }
}
