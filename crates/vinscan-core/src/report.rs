//! Analytics report assembled from the fixture tables

use crate::analytics::{self, MakeShare, SalesSummary, StatusShare};
use crate::fixtures;
use crate::types::{AnalyticsSample, LocationStat, PriceRange, TopPerformer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title printed on every exported report
pub const REPORT_TITLE: &str = "VINScan Pro Analytics Report";

/// Reporting window selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last month
    #[serde(rename = "1month")]
    OneMonth,
    /// Last three months
    #[serde(rename = "3months")]
    ThreeMonths,
    /// Last six months
    #[default]
    #[serde(rename = "6months")]
    SixMonths,
    /// Last year
    #[serde(rename = "1year")]
    OneYear,
}

impl TimeRange {
    /// Every selectable range
    pub const ALL: [Self; 4] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
    ];

    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1month",
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
            Self::OneYear => "1year",
        }
    }

    /// Selector label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneMonth => "Last Month",
            Self::ThreeMonths => "Last 3 Months",
            Self::SixMonths => "Last 6 Months",
            Self::OneYear => "Last Year",
        }
    }

    /// Date range printed on the report. Only the six month window has data
    /// behind it; the others are labelled as a custom period.
    #[must_use]
    pub const fn date_range_label(self) -> &'static str {
        match self {
            Self::SixMonths => "Last 6 Months",
            _ => "Custom Period",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidQuery {
                parameter: "time_range".to_string(),
                value: s.to_string(),
            })
    }
}

/// Everything the reports page and the exporters need
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// Report title
    pub title: String,
    /// Selected window
    pub time_range: TimeRange,
    /// Human readable window
    pub date_range: String,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Headline metrics
    pub metrics: SalesSummary,
    /// Monthly series
    pub sales_data: Vec<AnalyticsSample>,
    /// Make breakdown with shares
    pub make_distribution: Vec<MakeShare>,
    /// Status breakdown with shares
    pub status_distribution: Vec<StatusShare>,
    /// Price bands
    pub price_ranges: Vec<PriceRange>,
    /// Best sellers
    pub top_performers: Vec<TopPerformer>,
    /// Per-lot figures
    pub location_analytics: Vec<LocationStat>,
}

impl ReportData {
    /// Build the report from the fixture tables
    #[must_use]
    pub fn build(time_range: TimeRange, generated_at: DateTime<Utc>) -> Self {
        let sales_data = fixtures::sales_series();

        Self {
            title: REPORT_TITLE.to_string(),
            time_range,
            date_range: time_range.date_range_label().to_string(),
            generated_at,
            metrics: SalesSummary::from_series(&sales_data),
            sales_data,
            make_distribution: analytics::make_distribution(&fixtures::make_counts()),
            status_distribution: analytics::status_distribution(&fixtures::status_counts()),
            price_ranges: fixtures::price_ranges(),
            top_performers: fixtures::top_performers(),
            location_analytics: fixtures::location_stats(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(TimeRange::SixMonths, "Last 6 Months")]
    #[case(TimeRange::OneMonth, "Custom Period")]
    #[case(TimeRange::ThreeMonths, "Custom Period")]
    #[case(TimeRange::OneYear, "Custom Period")]
    fn test_date_range_label(#[case] range: TimeRange, #[case] expected: &str) {
        assert_eq!(range.date_range_label(), expected);
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!("6months".parse::<TimeRange>().unwrap(), TimeRange::SixMonths);
        assert_eq!("1YEAR".parse::<TimeRange>().unwrap(), TimeRange::OneYear);
        assert!("decade".parse::<TimeRange>().is_err());
        assert_eq!(TimeRange::default(), TimeRange::SixMonths);
    }

    #[test]
    fn test_time_range_serde_names() {
        assert_eq!(
            serde_json::to_string(&TimeRange::ThreeMonths).unwrap(),
            "\"3months\""
        );
    }

    #[test]
    fn test_build_report() {
        let report = ReportData::build(TimeRange::SixMonths, Utc::now());

        assert_eq!(report.title, "VINScan Pro Analytics Report");
        assert_eq!(report.date_range, "Last 6 Months");
        assert_eq!(report.sales_data.len(), 6);
        assert_eq!(report.metrics.total_sales, 121);
        assert_eq!(report.make_distribution.len(), 6);
        assert_eq!(report.status_distribution.len(), 3);
        assert_eq!(report.price_ranges.len(), 5);
        assert_eq!(report.top_performers.len(), 5);
        assert_eq!(report.location_analytics.len(), 3);
    }

    #[test]
    fn test_build_report_custom_period() {
        let report = ReportData::build(TimeRange::OneMonth, Utc::now());
        assert_eq!(report.date_range, "Custom Period");
        assert_eq!(report.time_range, TimeRange::OneMonth);
    }
}
