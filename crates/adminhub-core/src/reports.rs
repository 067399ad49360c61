//! Report listing with an optional date range

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{seed_reports, DateRange, Report};

/// Reports page state
#[derive(Debug, Clone)]
pub struct ReportsView {
    reports: Vec<Report>,
    range: Option<DateRange>,
}

impl Default for ReportsView {
    fn default() -> Self {
        Self::new(seed_reports())
    }
}

impl ReportsView {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports, range: None }
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    /// Restrict the listing to `range`; `None` shows everything
    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.range = range;
    }

    /// Reports inside the selected range, in listing order
    pub fn filtered(&self) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|report| self.range.map_or(true, |range| range.contains(report.date)))
            .cloned()
            .collect()
    }

    /// Caption under the report count
    pub fn period_caption(&self) -> &'static str {
        if self.range.is_some() {
            "For selected period"
        } else {
            "All time"
        }
    }
}

/// Build a range from optional bounds.
///
/// A range applies only when both ends are given; a single bound is ignored.
pub fn range_from_bounds(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<DateRange> {
    match (from, to) {
        (Some(from), Some(to)) => Some(DateRange::new(from, to)),
        _ => None,
    }
}

/// Parse `YYYY-MM-DD..YYYY-MM-DD`
pub fn parse_range(input: &str) -> Result<DateRange> {
    let (from, to) = input
        .split_once("..")
        .ok_or_else(|| Error::validation("expected a range like 2024-03-01..2024-03-31"))?;

    let parse = |raw: &str| {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| Error::validation(format!("invalid date '{}': {e}", raw.trim())))
    };

    let range = DateRange::new(parse(from)?, parse(to)?);
    if range.from > range.to {
        return Err(Error::validation("range start is after its end"));
    }
    Ok(range)
}
