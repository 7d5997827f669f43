//! Page and action handlers
//!
//! Every page handler returns the data its screen renders plus the header
//! navigation with the page marked active.

pub mod contact;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod landing;
pub mod pricing;
pub mod reports;
pub mod scanner;

use crate::error::{ApiError, core_error};
use serde::Serialize;
use std::str::FromStr;
use vinscan_core::VehicleRecord;
use vinscan_core::utils::{format_currency, format_mileage};

/// A table row: the record plus its display strings
#[derive(Debug, Clone, Serialize)]
pub struct VehicleView {
    /// Underlying record
    #[serde(flatten)]
    pub vehicle: VehicleRecord,
    /// "Honda Civic"
    pub display_name: String,
    /// "$22,500"
    pub price_display: String,
    /// "25,000 mi"
    pub mileage_display: String,
}

impl From<VehicleRecord> for VehicleView {
    fn from(vehicle: VehicleRecord) -> Self {
        Self {
            display_name: vehicle.display_name(),
            price_display: format_currency(vehicle.price),
            mileage_display: format_mileage(vehicle.mileage),
            vehicle,
        }
    }
}

/// Convert records into table rows
pub fn vehicle_views(vehicles: Vec<VehicleRecord>) -> Vec<VehicleView> {
    vehicles.into_iter().map(VehicleView::from).collect()
}

/// Parse an optional query parameter; absent or blank means "not given"
pub fn parse_param<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = vinscan_core::Error>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|err| core_error(&err)),
    }
}
