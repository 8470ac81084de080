//! Run statistics display

use crate::crawler::PageFailure;
use crate::state::RunStats;
use std::fmt::Write;

/// Renders run statistics as a human-readable summary
pub fn render_statistics(stats: &RunStats, failures: &[PageFailure]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Harvest Statistics ===\n");
    let _ = writeln!(out, "  Pages completed: {}", stats.pages_completed);
    let _ = writeln!(out, "  Articles searched: {}", stats.total_articles_searched);
    let _ = writeln!(out, "  Images found: {}", stats.total_images);

    if stats.assets_skipped > 0 {
        let _ = writeln!(out, "  Images skipped: {}", stats.assets_skipped);
    }

    if stats.has_failures() {
        let pages: Vec<String> = stats.failed_pages.iter().map(|p| p.to_string()).collect();
        let _ = writeln!(out, "\nFailed pages: {}", pages.join(", "));
        for failure in failures {
            let _ = writeln!(out, "  - page {}: {}", failure.page, failure.error);
        }
    }

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStats, failures: &[PageFailure]) {
    print!("{}", render_statistics(stats, failures));
}
