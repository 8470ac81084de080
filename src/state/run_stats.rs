use std::collections::BTreeSet;

/// Run-level statistics
///
/// Owned by the page walker for the whole run and updated only by it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Pages that finished with at least one image
    pub pages_completed: u32,

    /// Articles probed across all pages, including misses
    pub total_articles_searched: u64,

    /// Images downloaded; entries sharing a name collapse in the archive
    pub total_images: u64,

    /// Individual image downloads that failed and were skipped
    pub assets_skipped: u64,

    /// Page numbers abandoned because of a fatal error
    pub failed_pages: BTreeSet<u32>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a page that yielded images
    pub fn record_completed(&mut self, articles_searched: u64, images: u64, assets_skipped: u64) {
        self.pages_completed += 1;
        self.total_articles_searched += articles_searched;
        self.total_images += images;
        self.assets_skipped += assets_skipped;
    }

    /// Records a page that was exhausted without yielding any image
    pub fn record_empty(&mut self, articles_searched: u64, assets_skipped: u64) {
        self.total_articles_searched += articles_searched;
        self.assets_skipped += assets_skipped;
    }

    /// Records a page abandoned on a fatal error
    pub fn record_failed(&mut self, page: u32, articles_searched: u64, assets_skipped: u64) {
        self.failed_pages.insert(page);
        self.total_articles_searched += articles_searched;
        self.assets_skipped += assets_skipped;
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_pages.is_empty()
    }
}
