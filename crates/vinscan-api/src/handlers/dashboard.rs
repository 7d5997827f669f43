//! Dashboard page

use super::{VehicleView, vehicle_views};
use axum::{extract::Query, response::Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vinscan_core::analytics::{InventoryStats, inventory_stats};
use vinscan_core::fixtures::dashboard_vehicles;
use vinscan_core::inventory::{SearchFields, filter};
use vinscan_core::navigation::{Navigation, Route};
use vinscan_core::types::StatusFilter;
use vinscan_core::utils::format_currency;

/// Query parameters for the dashboard
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Search over VIN, make and model
    pub search: Option<String>,
}

/// Dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    /// Header
    pub navigation: Navigation,
    /// Stat cards, always over the whole fixture
    pub stats: InventoryStats,
    /// "$85,500"
    pub total_value_display: String,
    /// Search text echoed back
    pub search: String,
    /// Recent vehicles matching the search
    pub vehicles: Vec<VehicleView>,
}

/// `GET /dashboard`
pub async fn dashboard(Query(query): Query<DashboardQuery>) -> Json<DashboardPage> {
    let vehicles = dashboard_vehicles();
    let stats = inventory_stats(&vehicles);
    let search = query.search.unwrap_or_default();
    let matching = filter(&vehicles, &search, StatusFilter::All, SearchFields::Core);

    debug!(search = %search, matches = matching.len(), "Dashboard rendered");
    Json(DashboardPage {
        navigation: Navigation::for_route(Route::Dashboard),
        total_value_display: format_currency(stats.total_value),
        stats,
        search,
        vehicles: vehicle_views(matching),
    })
}
