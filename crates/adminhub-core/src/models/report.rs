//! Report data models

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a published report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Growth,
    Financial,
    Satisfaction,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Growth => "Growth",
            Self::Financial => "Financial",
            Self::Satisfaction => "Satisfaction",
        };
        f.write_str(label)
    }
}

/// A published report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: u64,
    pub title: String,
    pub date: NaiveDate,
    pub summary: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Whether `date` falls within the range, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Type of report requested from the generate-report form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Monthly,
    Financial,
    Clients,
    Performance,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        Self::Monthly,
        Self::Financial,
        Self::Clients,
        Self::Performance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly Overview",
            Self::Financial => "Financial Report",
            Self::Clients => "Client Activity",
            Self::Performance => "Performance Metrics",
        }
    }
}

/// Period covered by a requested report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPeriod {
    #[serde(rename = "last-7")]
    Last7,
    #[default]
    #[serde(rename = "last-30")]
    Last30,
    #[serde(rename = "last-90")]
    Last90,
    YearToDate,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 4] = [Self::Last7, Self::Last30, Self::Last90, Self::YearToDate];

    pub fn label(self) -> &'static str {
        match self {
            Self::Last7 => "Last 7 Days",
            Self::Last30 => "Last 30 Days",
            Self::Last90 => "Last 90 Days",
            Self::YearToDate => "Year to Date",
        }
    }
}

/// Generate-report form payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(rename = "dateRange")]
    pub period: ReportPeriod,
}

/// Reports available in every session
pub fn seed_reports() -> Vec<Report> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    vec![
        Report {
            id: 1,
            title: "Monthly Client Growth".to_string(),
            date: date(2024, 3, 1),
            summary: "Client base grew by 15% this month".to_string(),
            kind: ReportKind::Growth,
        },
        Report {
            id: 2,
            title: "Revenue Analysis".to_string(),
            date: date(2024, 3, 1),
            summary: "Revenue increased by 8% compared to last month".to_string(),
            kind: ReportKind::Financial,
        },
        Report {
            id: 3,
            title: "Client Satisfaction Survey".to_string(),
            date: date(2024, 2, 28),
            summary: "Overall satisfaction score: 4.8/5".to_string(),
            kind: ReportKind::Satisfaction,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
        let range = DateRange::new(day(1), day(10));
        assert!(range.contains(day(1)));
        assert!(range.contains(day(10)));
        assert!(!range.contains(day(11)));
    }

    #[test]
    fn test_request_wire_names() {
        let json = serde_json::to_value(ReportRequest::default()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "monthly", "dateRange": "last-30"}));

        let ytd = serde_json::to_value(ReportPeriod::YearToDate).unwrap();
        assert_eq!(ytd, "year-to-date");
    }
}
