//! Page walking across an edition
//!
//! Pages are probed from 1 upwards. The walk ends at the first page that
//! yields no image (end of edition), at the page cap, or on the first failed
//! page when the error policy is `Abort`.

use crate::config::PageErrorPolicy;
use crate::crawler::probe::{probe_page, PageOutcome};
use crate::crawler::session::Session;
use crate::crawler::{CrawlDate, CrawlTarget};
use crate::output::ImageAsset;
use crate::state::RunStats;
use crate::HarvestError;

/// A page abandoned on a fatal error
#[derive(Debug)]
pub struct PageFailure {
    pub page: u32,
    pub error: HarvestError,
}

/// Everything collected by a walk
#[derive(Debug, Default)]
pub struct WalkResult {
    pub images: Vec<ImageAsset>,
    pub stats: RunStats,
    pub failures: Vec<PageFailure>,
}

/// Walks the pages of one edition date
pub async fn walk_edition(session: &mut Session, date: CrawlDate) -> WalkResult {
    let max_pages = session.crawler().max_pages;
    let policy = session.crawler().on_page_error;
    let mut result = WalkResult::default();

    for page in 1..=max_pages {
        let report = probe_page(session, CrawlTarget::new(date, page)).await;

        match report.outcome {
            PageOutcome::Failed(error) => {
                tracing::warn!("Error scraping page {}: {}", page, error);
                result
                    .stats
                    .record_failed(page, report.articles_searched, report.assets_skipped);
                result.failures.push(PageFailure { page, error });

                if policy == PageErrorPolicy::Abort {
                    tracing::info!("Stopping run after failed page {}", page);
                    break;
                }
            }
            PageOutcome::Exhausted if report.images.is_empty() => {
                result
                    .stats
                    .record_empty(report.articles_searched, report.assets_skipped);
                tracing::info!("Page {} has no images, reached the end of the edition", page);
                break;
            }
            PageOutcome::Exhausted => {
                result.stats.record_completed(
                    report.articles_searched,
                    report.images.len() as u64,
                    report.assets_skipped,
                );
                result.images.extend(report.images);
            }
        }

        if page == max_pages {
            tracing::info!("Reached page limit of {}", max_pages);
        }
    }

    result
}
