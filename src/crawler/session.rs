//! Per-run transport context
//!
//! A session owns the single HTTP client of a run, the edition's locators
//! and the throttle. Every network request of a run goes through it.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, RetryPolicy};
use crate::crawler::throttle::Throttle;
use crate::locator::Locators;
use crate::HarvestError;
use reqwest::Client;

pub struct Session {
    client: Client,
    locators: Locators,
    crawler: CrawlerConfig,
    retry: RetryPolicy,
    throttle: Throttle,
}

impl Session {
    /// Builds the HTTP client and locators from configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.http)?;
        let locators = Locators::from_config(&config.publication)?;

        Ok(Self {
            client,
            locators,
            crawler: config.crawler.clone(),
            retry: RetryPolicy::from_config(&config.http),
            throttle: Throttle::new(config.crawler.request_delay()),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn locators(&self) -> &Locators {
        &self.locators
    }

    pub fn crawler(&self) -> &CrawlerConfig {
        &self.crawler
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn throttle(&mut self) -> &mut Throttle {
        &mut self.throttle
    }
}
