//! Crawler module: article discovery and image retrieval
//!
//! This module contains the core harvesting logic, including:
//! - The shared HTTP client and classified fetches with retry
//! - First-article resolution through the page redirect
//! - Bounded-miss probing of article IDs
//! - Image extraction and download
//! - Walking pages until the edition is exhausted

mod downloader;
mod extractor;
mod fetcher;
mod probe;
mod resolver;
mod session;
mod target;
mod throttle;
mod walker;

pub use downloader::download;
pub use extractor::{extract_images, image_urls, IMAGE_EXTENSIONS};
pub use fetcher::{build_http_client, fetch_url, FetchResult, RetryPolicy};
pub use probe::{probe_page, PageOutcome, PageReport};
pub use resolver::{parse_trailing_id, resolve_first_id};
pub use session::Session;
pub use target::{ArticleId, CrawlDate, CrawlTarget};
pub use throttle::Throttle;
pub use walker::{walk_edition, PageFailure, WalkResult};

use crate::config::Config;
use crate::output::{archive_file_name, package, Archive};
use crate::state::RunStats;
use crate::HarvestError;
use std::collections::HashSet;

/// Outcome of a complete run, handed to the front-end
#[derive(Debug)]
pub struct Harvest {
    /// `None` when no image was found
    pub archive: Option<Archive>,
    pub stats: RunStats,
    pub failures: Vec<PageFailure>,
}

/// Harvests every image of one edition date
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client and locators
/// 2. Walk pages from 1, probing articles on each
/// 3. Package the downloaded images into a zip archive
///
/// Page-level failures do not make this return an error; they are listed in
/// `Harvest::failures` and `RunStats::failed_pages`.
///
/// # Example
///
/// ```no_run
/// use epaper_harvest::config::Config;
/// use epaper_harvest::crawler::{harvest, CrawlDate};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let date = CrawlDate::parse("01-03-2025")?;
/// let result = harvest(&Config::default(), date).await?;
/// println!("{} images", result.stats.total_images);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: &Config, date: CrawlDate) -> Result<Harvest, HarvestError> {
    let mut session = Session::new(config)?;

    tracing::info!(
        "Harvesting {} edition for {}",
        config.publication.edition,
        date
    );
    let walk = walk_edition(&mut session, date).await;

    let archive = if walk.images.is_empty() {
        None
    } else {
        let bytes = package(
            walk.images
                .iter()
                .map(|image| (image.filename.as_str(), image.bytes.as_slice())),
        )?;
        let entries = walk
            .images
            .iter()
            .map(|image| image.filename.as_str())
            .collect::<HashSet<_>>()
            .len();
        Some(Archive {
            file_name: archive_file_name(&config.publication.slug, &date),
            entries,
            bytes,
        })
    };

    tracing::info!(
        "Harvest finished: {} pages, {} articles, {} images",
        walk.stats.pages_completed,
        walk.stats.total_articles_searched,
        walk.stats.total_images
    );

    Ok(Harvest {
        archive,
        stats: walk.stats,
        failures: walk.failures,
    })
}
