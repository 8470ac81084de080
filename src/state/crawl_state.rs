use crate::crawler::ArticleId;

/// Probing state for a single page
///
/// Article IDs are probed in strictly increasing order. Every recorded
/// outcome advances `current_article_id` by exactly one, so no ID is probed
/// twice and none is skipped. The page is exhausted once
/// `consecutive_misses` reaches the miss threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    /// Next article ID to probe
    pub current_article_id: ArticleId,

    /// Number of 404 responses since the last hit
    pub consecutive_misses: u32,

    /// Articles probed so far on this page (hits and misses)
    pub articles_searched: u64,

    /// Images downloaded so far on this page
    pub images_found: u64,

    miss_threshold: u32,

    /// False once `current_article_id` was the largest representable ID
    ids_remaining: bool,
}

impl CrawlState {
    /// Creates the initial state, starting at the page's first article
    pub fn new(first_article_id: ArticleId, miss_threshold: u32) -> Self {
        Self {
            current_article_id: first_article_id,
            consecutive_misses: 0,
            articles_searched: 0,
            images_found: 0,
            miss_threshold,
            ids_remaining: true,
        }
    }

    /// Records a 200 response that yielded `images` downloaded images
    pub fn record_hit(&mut self, images: u64) {
        self.consecutive_misses = 0;
        self.images_found += images;
        self.advance();
    }

    /// Records a 404 response
    pub fn record_miss(&mut self) {
        self.consecutive_misses += 1;
        self.advance();
    }

    /// True once the miss threshold has been reached or no ID is left to probe
    pub fn is_exhausted(&self) -> bool {
        self.consecutive_misses >= self.miss_threshold || !self.ids_remaining
    }

    pub fn miss_threshold(&self) -> u32 {
        self.miss_threshold
    }

    fn advance(&mut self) {
        self.articles_searched += 1;
        match self.current_article_id.checked_add(1) {
            Some(next) => self.current_article_id = next,
            None => self.ids_remaining = false,
        }
    }
}
