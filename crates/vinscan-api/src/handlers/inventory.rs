//! Inventory table and CSV export

use super::{VehicleView, parse_param, vehicle_views};
use crate::error::{ApiResult, core_error};
use axum::{extract::Query, response::Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use vinscan_core::export::{ExportedDocument, INVENTORY_EXPORTED, export_inventory_csv};
use vinscan_core::fixtures::inventory_vehicles;
use vinscan_core::inventory::{InventoryQuery, SearchFields, SortDirection, SortField};
use vinscan_core::navigation::{Navigation, Route};
use vinscan_core::types::{ApiResponse, StatusFilter, VehicleStatus};

/// Raw query string for the inventory table
#[derive(Debug, Default, Deserialize)]
pub struct InventoryParams {
    /// Search over VIN, make, model and color
    pub search: Option<String>,
    /// `all`, `available`, `sold` or `reserved`
    pub status: Option<String>,
    /// Sort column
    pub sort: Option<String>,
    /// `asc` or `desc`
    pub direction: Option<String>,
}

impl InventoryParams {
    /// Resolve into a table query
    ///
    /// Without `sort` the table is newest first. Choosing a column without a
    /// direction sorts it ascending, like clicking a fresh column header.
    pub fn to_query(&self) -> Result<InventoryQuery, crate::error::ApiError> {
        let status = parse_param::<StatusFilter>(self.status.as_deref())?.unwrap_or_default();
        let sort = parse_param::<SortField>(self.sort.as_deref())?;
        let direction = parse_param::<SortDirection>(self.direction.as_deref())?;

        let mut query = InventoryQuery::default()
            .with_search(self.search.clone().unwrap_or_default())
            .with_status(status);
        if let Some(field) = sort {
            query.sort_field = field;
            query.sort_direction = SortDirection::Asc;
        }
        if let Some(direction) = direction {
            query.sort_direction = direction;
        }
        Ok(query)
    }
}

/// A choice in a select control
#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    /// Query value
    pub value: String,
    /// Display label
    pub label: String,
}

/// Inventory payload
#[derive(Debug, Clone, Serialize)]
pub struct InventoryPage {
    /// Header
    pub navigation: Navigation,
    /// Effective search, filter and sort
    pub query: InventoryQuery,
    /// Vehicles before filtering
    pub total: usize,
    /// Vehicles shown
    pub count: usize,
    /// Rows in display order
    pub vehicles: Vec<VehicleView>,
    /// Status filter choices
    pub status_options: Vec<Choice>,
    /// Sortable columns
    pub sort_fields: Vec<&'static str>,
}

fn status_options() -> Vec<Choice> {
    std::iter::once(Choice {
        value: "all".to_string(),
        label: "All Status".to_string(),
    })
    .chain(VehicleStatus::ALL.iter().map(|status| Choice {
        value: status.label().to_lowercase(),
        label: status.label().to_string(),
    }))
    .collect()
}

/// `GET /inventory`
pub async fn inventory(Query(params): Query<InventoryParams>) -> ApiResult<InventoryPage> {
    let query = params.to_query()?;
    let vehicles = inventory_vehicles();
    let rows = query.apply(&vehicles, SearchFields::WithColor);

    Ok(Json(InventoryPage {
        navigation: Navigation::for_route(Route::Inventory),
        total: vehicles.len(),
        count: rows.len(),
        vehicles: vehicle_views(rows),
        query,
        status_options: status_options(),
        sort_fields: SortField::ALL.iter().map(|field| field.as_str()).collect(),
    }))
}

/// `POST /api/inventory/export`
///
/// Exports the rows the same query would show.
pub async fn export_inventory(
    Query(params): Query<InventoryParams>,
) -> ApiResult<ApiResponse<ExportedDocument>> {
    let query = params.to_query()?;
    let rows = query.apply(&inventory_vehicles(), SearchFields::WithColor);
    let document = export_inventory_csv(&rows, chrono::Utc::now().date_naive())
        .map_err(|err| core_error(&err))?;

    info!(
        filename = %document.filename,
        rows = rows.len(),
        "Inventory exported"
    );
    Ok(Json(ApiResponse::success_with_message(
        document,
        INVENTORY_EXPORTED,
    )))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(sort: Option<&str>, direction: Option<&str>) -> InventoryParams {
        InventoryParams {
            sort: sort.map(str::to_string),
            direction: direction.map(str::to_string),
            ..InventoryParams::default()
        }
    }

    #[test]
    fn test_default_query_is_newest_first() {
        let query = params(None, None).to_query().unwrap();
        assert_eq!(query, InventoryQuery::default());
    }

    #[test]
    fn test_new_column_starts_ascending() {
        let query = params(Some("price"), None).to_query().unwrap();
        assert_eq!(query.sort_field, SortField::Price);
        assert_eq!(query.sort_direction, SortDirection::Asc);

        let query = params(Some("price"), Some("desc")).to_query().unwrap();
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_bad_parameters_rejected() {
        assert!(params(Some("horsepower"), None).to_query().is_err());
        assert!(params(None, Some("sideways")).to_query().is_err());
    }

    #[test]
    fn test_status_options() {
        let options = status_options();
        let values: Vec<_> = options.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["all", "available", "sold", "reserved"]);
    }
}
