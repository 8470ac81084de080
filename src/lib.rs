//! Epaper-Harvest: image harvester for article-indexed e-paper editions
//!
//! The publication exposes no listing API. Each page of a dated edition
//! redirects to its first article; articles are numbered sequentially with
//! gaps. This crate discovers article IDs by probing forward until a run of
//! consecutive misses, downloads every embedded image and packages the
//! results into a single zip archive.

pub mod config;
pub mod crawler;
pub mod locator;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot determine first article id from {url}: {reason}")]
    Resolution { url: String, reason: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Asset download failed for {url} (status: {status:?})")]
    AssetFetch { url: String, status: Option<u16> },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid date '{0}', expected dd-mm-yyyy")]
    InvalidDate(String),

    #[error("Date {date} is outside the allowed window ({earliest} to {latest})")]
    DateOutOfRange {
        date: String,
        earliest: String,
        latest: String,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, CrawlDate, CrawlTarget, Harvest, PageFailure};
pub use locator::Locators;
pub use output::{Archive, ImageAsset};
pub use state::{CrawlState, RunStats};
