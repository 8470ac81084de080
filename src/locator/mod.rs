//! Locator construction for the e-paper site
//!
//! Every page and article of an edition is addressed by a fixed template:
//!
//! - page: `{base}/view_article/{edition}/{date}/{page}`
//! - article: `{base}/view_article/{edition}/{date}/{page}/{article_id}`
//!
//! The page locator redirects to the first article of that page.

use crate::config::PublicationConfig;
use crate::crawler::{ArticleId, CrawlTarget};
use crate::HarvestError;
use url::Url;

/// Builds canonical locators for one edition
#[derive(Debug, Clone)]
pub struct Locators {
    /// Origin used to resolve relative image references
    base: Url,

    /// `{base}/view_article/{edition}` without a trailing slash
    prefix: String,
}

impl Locators {
    /// Creates locators for the given publication base URL and edition
    pub fn new(base_url: &str, edition: &str) -> Result<Self, HarvestError> {
        let base = Url::parse(base_url)?;
        let prefix = format!(
            "{}/view_article/{}",
            base.as_str().trim_end_matches('/'),
            edition
        );

        Ok(Self { base, prefix })
    }

    pub fn from_config(config: &PublicationConfig) -> Result<Self, HarvestError> {
        Self::new(&config.base_url, &config.edition)
    }

    /// The publication origin
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Locator of a page; requesting it redirects to the page's first article
    pub fn page_url(&self, target: &CrawlTarget) -> String {
        format!("{}/{}/{}", self.prefix, target.date, target.page)
    }

    /// Locator of one numbered article on a page
    pub fn article_url(&self, target: &CrawlTarget, article_id: ArticleId) -> String {
        format!("{}/{}", self.page_url(target), article_id)
    }
}
