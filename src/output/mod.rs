//! Output module for packaging harvested images
//!
//! This module handles:
//! - Naming downloaded images as archive entries
//! - Packaging entries into a deterministic zip archive
//! - Printing run statistics

pub mod archive;
pub mod stats;

pub use archive::{archive_file_name, package, read_archive, Archive};
pub use stats::{print_statistics, render_statistics};

use crate::config::ImageNaming;
use crate::crawler::{ArticleId, CrawlTarget};

/// One downloaded image, ready to be packaged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Archive entry name
    pub filename: String,

    /// Where the bytes were downloaded from
    pub source_url: String,

    pub bytes: Vec<u8>,
}

impl ImageAsset {
    pub fn new(filename: String, source_url: String, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            source_url,
            bytes,
        }
    }
}

/// Archive entry name for the `index`-th image (1-based) of an article
///
/// Entries always carry a `.jpeg` suffix whatever the source format.
pub fn asset_file_name(
    naming: ImageNaming,
    target: &CrawlTarget,
    article_id: ArticleId,
    index: usize,
) -> String {
    match naming {
        ImageNaming::Indexed => format!(
            "{}_{}_{}_{}.jpeg",
            target.date, target.page, article_id, index
        ),
        ImageNaming::PerArticle => format!("{}_{}_{}.jpeg", target.date, target.page, article_id),
    }
}
