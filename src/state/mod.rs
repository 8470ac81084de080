//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: per-page probing state (current article, miss counter)
//! - `RunStats`: run-level totals, mutated only by the page walker

mod crawl_state;
mod run_stats;

// Re-export main types
pub use crawl_state::CrawlState;
pub use run_stats::RunStats;
