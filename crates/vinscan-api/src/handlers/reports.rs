//! Analytics reports and report export

use super::parse_param;
use crate::error::{ApiResult, core_error};
use axum::{extract::Query, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use vinscan_core::export::{ExportFormat, ExportedDocument, REPORT_EXPORTED, exporter_for};
use vinscan_core::navigation::{Navigation, Route};
use vinscan_core::report::{ReportData, TimeRange};
use vinscan_core::types::ApiResponse;

/// Query parameters for the reports page
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// `1month`, `3months`, `6months` or `1year`
    pub time_range: Option<String>,
    /// `csv` or `json`, export only
    pub format: Option<String>,
}

/// A time range choice
#[derive(Debug, Clone, Serialize)]
pub struct RangeOption {
    /// Query value
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Reports payload
#[derive(Debug, Clone, Serialize)]
pub struct ReportsPage {
    /// Header
    pub navigation: Navigation,
    /// Aggregated report
    pub report: ReportData,
    /// Time range selector
    pub time_ranges: Vec<RangeOption>,
}

fn build_report(params: &ReportParams) -> Result<ReportData, crate::error::ApiError> {
    let time_range = parse_param::<TimeRange>(params.time_range.as_deref())?.unwrap_or_default();
    Ok(ReportData::build(time_range, chrono::Utc::now()))
}

/// `GET /reports`
pub async fn reports(Query(params): Query<ReportParams>) -> ApiResult<ReportsPage> {
    let report = build_report(&params)?;

    Ok(Json(ReportsPage {
        navigation: Navigation::for_route(Route::Reports),
        report,
        time_ranges: TimeRange::ALL
            .into_iter()
            .map(|range| RangeOption {
                value: range.as_str(),
                label: range.label(),
            })
            .collect(),
    }))
}

/// `POST /api/reports/export`
pub async fn export_report(
    Query(params): Query<ReportParams>,
) -> ApiResult<ApiResponse<ExportedDocument>> {
    let format = parse_param::<ExportFormat>(params.format.as_deref())?.unwrap_or_default();
    let report = build_report(&params)?;

    let exporter = exporter_for(format);
    let document = exporter.export(&report).map_err(|err| core_error(&err))?;

    info!(
        filename = %document.filename,
        format = ?exporter.format(),
        bytes = document.body.len(),
        "Report exported"
    );
    Ok(Json(ApiResponse::success_with_message(
        document,
        REPORT_EXPORTED,
    )))
}
