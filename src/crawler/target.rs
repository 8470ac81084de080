//! Crawl targets: an edition date plus a page number

use crate::HarvestError;
use chrono::{Duration, NaiveDate};
use std::fmt;

/// Sequential article number within a page
pub type ArticleId = u64;

/// Edition date, rendered as `dd-mm-yyyy` in every locator and file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CrawlDate(NaiveDate);

impl CrawlDate {
    const FORMAT: &'static str = "%d-%m-%Y";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses `dd-mm-yyyy`, falling back to ISO `yyyy-mm-dd`
    pub fn parse(input: &str) -> Result<Self, HarvestError> {
        let input = input.trim();
        NaiveDate::parse_from_str(input, Self::FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
            .map(Self)
            .map_err(|_| HarvestError::InvalidDate(input.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Rejects future dates and dates more than `window_days` before `today`
    pub fn ensure_within_window(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> Result<(), HarvestError> {
        // A window reaching past the calendar's start admits every past date
        let earliest = today
            .checked_sub_signed(Duration::days(i64::from(window_days)))
            .unwrap_or(NaiveDate::MIN);
        if self.0 < earliest || self.0 > today {
            return Err(HarvestError::DateOutOfRange {
                date: self.to_string(),
                earliest: Self(earliest).to_string(),
                latest: Self(today).to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for CrawlDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// One page-crawl unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlTarget {
    pub date: CrawlDate,
    /// 1-based page number
    pub page: u32,
}

impl CrawlTarget {
    pub fn new(date: CrawlDate, page: u32) -> Self {
        Self { date, page }
    }
}
