//! Configuration module for Epaper-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults for
//! the Ahmedabad edition of Gujarat Samachar.
//!
//! # Example
//!
//! ```no_run
//! use epaper_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Miss threshold: {}", config.crawler.miss_threshold);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, HttpConfig, ImageNaming, OutputConfig, PageErrorPolicy,
    PublicationConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
