//! Document export for inventory tables and analytics reports

use crate::report::ReportData;
use crate::types::VehicleRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Confirmation shown after an inventory export
pub const INVENTORY_EXPORTED: &str = "Inventory exported successfully!";

/// Confirmation shown after a report export
pub const REPORT_EXPORTED: &str = "Report exported successfully!";

/// Output document format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values
    #[default]
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl ExportFormat {
    /// MIME type of the produced document
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }

    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(crate::Error::InvalidQuery {
                parameter: "format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A produced document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedDocument {
    /// Suggested file name
    pub filename: String,
    /// Document format
    pub format: ExportFormat,
    /// Document body
    pub body: String,
}

impl ExportedDocument {
    /// MIME type of the body
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Turns aggregated report data into a document, or fails
pub trait ReportExporter: Send + Sync + fmt::Debug {
    /// Format this exporter produces
    fn format(&self) -> ExportFormat;

    /// Render `report`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Export`] if the document cannot be produced.
    fn export(&self, report: &ReportData) -> crate::Result<ExportedDocument>;
}

fn report_filename(report: &ReportData, format: ExportFormat) -> String {
    format!(
        "vinscan-report-{}.{}",
        report.generated_at.format("%Y-%m-%d"),
        format.extension()
    )
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> crate::Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::Error::export("csv", e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| crate::Error::export("csv", e.to_string()))
}

/// Sectioned CSV: metrics, monthly sales, then each breakdown table
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportExporter;

impl ReportExporter for CsvReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn export(&self, report: &ReportData) -> crate::Result<ExportedDocument> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        writer.write_record([report.title.as_str()])?;
        writer.write_record(["Date Range", report.date_range.as_str()])?;
        writer.write_record([
            "Generated",
            report.generated_at.format("%Y-%m-%d").to_string().as_str(),
        ])?;
        writer.write_record([""])?;

        let metrics = &report.metrics;
        writer.write_record(["Metric", "Value"])?;
        writer.write_record(["Total Revenue", metrics.total_revenue.to_string().as_str()])?;
        writer.write_record(["Total Sales", metrics.total_sales.to_string().as_str()])?;
        writer.write_record(["Average Inventory", metrics.avg_inventory.to_string().as_str()])?;
        writer.write_record([
            "Average Sale Price",
            metrics.avg_sale_price.to_string().as_str(),
        ])?;
        writer.write_record([
            "Revenue Growth %",
            format!("{:.1}", metrics.revenue_growth).as_str(),
        ])?;
        writer.write_record([""])?;

        writer.write_record(["Month", "Sales", "Revenue", "Inventory"])?;
        for sample in &report.sales_data {
            writer.write_record([
                sample.month.clone(),
                sample.sales.to_string(),
                sample.revenue.to_string(),
                sample.inventory.to_string(),
            ])?;
        }
        writer.write_record([""])?;

        writer.write_record(["Make", "Count", "Value", "Percentage"])?;
        for make in &report.make_distribution {
            writer.write_record([
                make.make.clone(),
                make.count.to_string(),
                make.value.to_string(),
                format!("{:.1}", make.percentage),
            ])?;
        }
        writer.write_record([""])?;

        writer.write_record(["Status", "Count", "Percentage"])?;
        for status in &report.status_distribution {
            writer.write_record([
                status.status.label().to_string(),
                status.count.to_string(),
                format!("{:.1}", status.percentage),
            ])?;
        }
        writer.write_record([""])?;

        writer.write_record(["Model", "Sold", "Revenue", "Avg Days"])?;
        for performer in &report.top_performers {
            writer.write_record([
                performer.model.clone(),
                performer.sold.to_string(),
                performer.revenue.to_string(),
                performer.avg_days.to_string(),
            ])?;
        }
        writer.write_record([""])?;

        writer.write_record(["Location", "Vehicles", "Utilization %", "Revenue"])?;
        for location in &report.location_analytics {
            writer.write_record([
                location.location.clone(),
                location.vehicles.to_string(),
                location.utilization.to_string(),
                location.revenue.to_string(),
            ])?;
        }

        Ok(ExportedDocument {
            filename: report_filename(report, ExportFormat::Csv),
            format: ExportFormat::Csv,
            body: finish_csv(writer)?,
        })
    }
}

/// The whole report as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportExporter;

impl ReportExporter for JsonReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn export(&self, report: &ReportData) -> crate::Result<ExportedDocument> {
        let body = serde_json::to_string_pretty(report)
            .map_err(|e| crate::Error::export("json", e.to_string()))?;

        Ok(ExportedDocument {
            filename: report_filename(report, ExportFormat::Json),
            format: ExportFormat::Json,
            body,
        })
    }
}

/// Exporter for `format`
#[must_use]
pub fn exporter_for(format: ExportFormat) -> Box<dyn ReportExporter> {
    match format {
        ExportFormat::Csv => Box::new(CsvReportExporter),
        ExportFormat::Json => Box::new(JsonReportExporter),
    }
}

/// Inventory table as CSV, one row per vehicle in the given order
///
/// # Errors
///
/// Returns [`crate::Error::Export`] if a row cannot be written.
pub fn export_inventory_csv(
    vehicles: &[VehicleRecord],
    exported_on: NaiveDate,
) -> crate::Result<ExportedDocument> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for vehicle in vehicles {
        writer.serialize(vehicle)?;
    }

    let mut body = finish_csv(writer)?;
    if vehicles.is_empty() {
        body = "id,vin,make,model,year,color,mileage,price,status,location,date_added,condition\n"
            .to_string();
    }

    Ok(ExportedDocument {
        filename: format!("inventory-{}.csv", exported_on.format("%Y-%m-%d")),
        format: ExportFormat::Csv,
        body,
    })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::inventory_vehicles;
    use crate::report::TimeRange;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn report() -> ReportData {
        ReportData::build(
            TimeRange::SixMonths,
            Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.content_type(), "application/json");
    }

    #[test]
    fn test_csv_report_export() {
        let document = CsvReportExporter.export(&report()).unwrap();

        assert_eq!(document.filename, "vinscan-report-2024-07-01.csv");
        assert_eq!(document.content_type(), "text/csv");

        let mut lines = document.body.lines();
        assert_eq!(lines.next(), Some("VINScan Pro Analytics Report"));
        assert_eq!(lines.next(), Some("Date Range,Last 6 Months"));
        assert!(document.body.contains("Total Revenue,4200000"));
        assert!(document.body.contains("Jun,25,850000,102"));
        assert!(document.body.contains("Lot A,45,85,1250000"));
        assert!(document.body.contains("Available,68,61.8"));
    }

    #[test]
    fn test_json_report_export() {
        let document = JsonReportExporter.export(&report()).unwrap();
        assert_eq!(document.filename, "vinscan-report-2024-07-01.json");

        let parsed: ReportData = serde_json::from_str(&document.body).unwrap();
        assert_eq!(parsed.title, "VINScan Pro Analytics Report");
        assert_eq!(parsed.metrics.total_sales, 121);
    }

    #[test]
    fn test_exporter_for() {
        assert_eq!(exporter_for(ExportFormat::Csv).format(), ExportFormat::Csv);
        assert_eq!(exporter_for(ExportFormat::Json).format(), ExportFormat::Json);
    }

    #[test]
    fn test_inventory_csv() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let document = export_inventory_csv(&inventory_vehicles(), date).unwrap();

        assert_eq!(document.filename, "inventory-2024-02-01.csv");
        let lines: Vec<_> = document.body.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "id,vin,make,model,year,color,mileage,price,status,location,date_added,condition"
        );
        assert_eq!(
            lines[1],
            "1,1HGBH41JXMN109186,Honda,Civic,2021,Silver,25000,22500,Available,Lot A-12,2024-01-15,Excellent"
        );
    }

    #[test]
    fn test_inventory_csv_empty_has_header() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let document = export_inventory_csv(&[], date).unwrap();
        assert_eq!(document.body.lines().count(), 1);
    }
}
