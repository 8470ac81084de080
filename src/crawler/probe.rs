//! Article probing for a single page
//!
//! The site has no "last article" marker. Starting from the resolved first
//! article, IDs are probed one at a time in increasing order:
//!
//! | Response | Action |
//! |----------|--------|
//! | 200 | Reset miss counter, download every image, continue |
//! | 404 | Increment miss counter, continue |
//! | Other status / transport failure | Abandon the page |
//!
//! The page is exhausted once the miss counter reaches the threshold.

use crate::crawler::downloader::download;
use crate::crawler::extractor::extract_images;
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::resolver::resolve_first_id;
use crate::crawler::session::Session;
use crate::crawler::CrawlTarget;
use crate::output::{asset_file_name, ImageAsset};
use crate::state::CrawlState;
use crate::HarvestError;

/// How probing of a page ended
#[derive(Debug)]
pub enum PageOutcome {
    /// The miss threshold was reached
    Exhausted,

    /// A fatal error abandoned the page
    Failed(HarvestError),
}

/// Result of probing one page
#[derive(Debug)]
pub struct PageReport {
    /// Articles probed, hits and misses
    pub articles_searched: u64,

    /// Images whose download failed and were skipped
    pub assets_skipped: u64,

    /// Downloaded images; always empty for a failed page
    pub images: Vec<ImageAsset>,

    pub outcome: PageOutcome,
}

impl PageReport {
    fn failed(
        articles_searched: u64,
        assets_skipped: u64,
        error: HarvestError,
    ) -> Self {
        Self {
            articles_searched,
            assets_skipped,
            images: Vec::new(),
            outcome: PageOutcome::Failed(error),
        }
    }
}

/// Probes every article of a page and downloads its images
///
/// A failed page never returns partial images.
pub async fn probe_page(session: &mut Session, target: CrawlTarget) -> PageReport {
    let first_id = match resolve_first_id(session, &target).await {
        Ok(id) => id,
        Err(e) => return PageReport::failed(0, 0, e),
    };

    let naming = session.crawler().image_naming;
    let mut state = CrawlState::new(first_id, session.crawler().miss_threshold);
    let mut images = Vec::new();
    let mut assets_skipped = 0;

    tracing::info!(
        "Scanning page {} from article {}",
        target.page,
        state.current_article_id
    );

    while !state.is_exhausted() {
        let article_id = state.current_article_id;
        let url = session.locators().article_url(&target, article_id);

        session.throttle().wait().await;
        match fetch_url(session.client(), &url, session.retry()).await {
            FetchResult::Success { body, .. } => {
                let html = String::from_utf8_lossy(&body);
                let image_urls = extract_images(&html, session.locators().base());
                tracing::debug!("Article {}: {} image(s)", article_id, image_urls.len());

                let mut found = 0;
                for (index, image_url) in image_urls.iter().enumerate() {
                    match download(session.client(), image_url.as_str(), session.retry()).await {
                        Ok(bytes) => {
                            let filename = asset_file_name(naming, &target, article_id, index + 1);
                            images.push(ImageAsset::new(filename, image_url.to_string(), bytes));
                            found += 1;
                        }
                        Err(e) => {
                            tracing::warn!("Skipping image of article {}: {}", article_id, e);
                            assets_skipped += 1;
                        }
                    }
                }

                session.throttle().mark();
                state.record_hit(found);
            }
            FetchResult::NotFound => {
                session.throttle().mark();
                state.record_miss();
                tracing::trace!(
                    "Article {} not found ({}/{} consecutive misses)",
                    article_id,
                    state.consecutive_misses,
                    state.miss_threshold()
                );
            }
            FetchResult::HttpError { status_code } => {
                session.throttle().mark();
                let error = HarvestError::Http {
                    url,
                    status: status_code,
                };
                return PageReport::failed(state.articles_searched, assets_skipped, error);
            }
            FetchResult::NetworkError { error } => {
                session.throttle().mark();
                let error = HarvestError::Transport { url, source: error };
                return PageReport::failed(state.articles_searched, assets_skipped, error);
            }
        }
    }

    tracing::info!(
        "Page {} exhausted after {} articles: {} image(s)",
        target.page,
        state.articles_searched,
        state.images_found
    );

    PageReport {
        articles_searched: state.articles_searched,
        assets_skipped,
        images,
        outcome: PageOutcome::Exhausted,
    }
}
