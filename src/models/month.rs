use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Calendar-month bucket key used by every date-grouped aggregation.
/// Derived `Ord` sorts chronologically, so no string tricks are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Bucket for a stored ISO date string. Records whose date does not
    /// parse get `None` and fall out of bucketed aggregations.
    pub fn parse_date(raw: &str) -> Option<Self> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Self::of)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
