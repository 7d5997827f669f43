//! Aggregation engine
//!
//! Pure folds over fixture collections. Empty inputs and zero denominators
//! yield `0` instead of NaN or infinity.

use crate::types::{AnalyticsSample, MakeCount, VehicleRecord, VehicleStatus};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Number of vehicles
    pub total_vehicles: u32,
    /// Vehicles with status Available
    pub available_vehicles: u32,
    /// Vehicles with status Sold
    pub sold_vehicles: u32,
    /// Vehicles with status Reserved
    pub reserved_vehicles: u32,
    /// Sum of asking prices
    pub total_value: Decimal,
}

/// A status bucket with its share of the whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    /// Status
    pub status: VehicleStatus,
    /// Vehicles with this status
    pub count: u32,
    /// Share of all vehicles, 0-100
    pub percentage: f64,
}

/// A make with its share of the whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeShare {
    /// Manufacturer
    pub make: String,
    /// Vehicles of this make
    pub count: u32,
    /// Combined value
    pub value: Decimal,
    /// Share of all vehicles, 0-100
    pub percentage: f64,
    /// Value per vehicle, rounded to whole dollars
    pub average_value: Decimal,
}

/// Report headline metrics over a sales series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    /// Revenue over every month
    pub total_revenue: Decimal,
    /// Vehicles sold over every month
    pub total_sales: u32,
    /// Mean monthly inventory, rounded
    pub avg_inventory: u32,
    /// Revenue per sale, rounded to whole dollars
    pub avg_sale_price: Decimal,
    /// First-to-last month revenue growth in percent
    pub revenue_growth: f64,
}

fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal quotient, zero when the divisor is zero
fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Sum of a sequence of amounts
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().sum()
}

/// Arithmetic mean, `0.0` for an empty slice
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.is_finite() { mean } else { 0.0 }
}

/// `part / total * 100`, `0.0` when `total` is zero
#[must_use]
pub fn percentage_share(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(part) / f64::from(total) * 100.0
}

/// `(last - first) / first`, `0.0` when `first` is zero
#[must_use]
pub fn growth_rate(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    let rate = (last - first) / first;
    if rate.is_finite() { rate } else { 0.0 }
}

/// Growth rate between the first and last element of a series
#[must_use]
pub fn series_growth_rate(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => growth_rate(*first, *last),
        _ => 0.0,
    }
}

/// Vehicle count per status, in [`VehicleStatus::ALL`] order
#[must_use]
pub fn count_by_status(vehicles: &[VehicleRecord]) -> Vec<(VehicleStatus, u32)> {
    VehicleStatus::ALL
        .into_iter()
        .map(|status| {
            let count = vehicles.iter().filter(|v| v.status == status).count();
            (status, count_u32(count))
        })
        .collect()
}

/// Dashboard stats for a vehicle collection
#[must_use]
pub fn inventory_stats(vehicles: &[VehicleRecord]) -> InventoryStats {
    let counts = count_by_status(vehicles);
    let count_of = |wanted: VehicleStatus| {
        counts
            .iter()
            .find(|(status, _)| *status == wanted)
            .map_or(0, |(_, count)| *count)
    };

    InventoryStats {
        total_vehicles: count_u32(vehicles.len()),
        available_vehicles: count_of(VehicleStatus::Available),
        sold_vehicles: count_of(VehicleStatus::Sold),
        reserved_vehicles: count_of(VehicleStatus::Reserved),
        total_value: sum(vehicles.iter().map(|v| v.price)),
    }
}

/// Attach percentage shares to status counts
#[must_use]
pub fn status_distribution(counts: &[(VehicleStatus, u32)]) -> Vec<StatusShare> {
    let total = counts.iter().map(|(_, count)| count).sum();
    counts
        .iter()
        .map(|&(status, count)| StatusShare {
            status,
            count,
            percentage: percentage_share(count, total),
        })
        .collect()
}

/// Attach percentage shares and per-vehicle value to make counts
#[must_use]
pub fn make_distribution(makes: &[MakeCount]) -> Vec<MakeShare> {
    let total = makes.iter().map(|m| m.count).sum();
    makes
        .iter()
        .map(|m| MakeShare {
            make: m.make.clone(),
            count: m.count,
            value: m.value,
            percentage: percentage_share(m.count, total),
            average_value: round_whole(safe_div(m.value, Decimal::from(m.count))),
        })
        .collect()
}

impl SalesSummary {
    /// Fold a monthly series into headline metrics
    #[must_use]
    pub fn from_series(series: &[AnalyticsSample]) -> Self {
        let total_revenue = sum(series.iter().map(|s| s.revenue));
        let total_sales: u32 = series.iter().map(|s| s.sales).sum();
        let months = count_u32(series.len());
        let total_inventory: u32 = series.iter().map(|s| s.inventory).sum();

        let avg_inventory = if months == 0 {
            0
        } else {
            (total_inventory + months / 2) / months
        };

        let revenues: Vec<f64> = series
            .iter()
            .map(|s| s.revenue.to_f64().unwrap_or_default())
            .collect();

        Self {
            total_revenue,
            total_sales,
            avg_inventory,
            avg_sale_price: round_whole(safe_div(total_revenue, Decimal::from(total_sales))),
            revenue_growth: series_growth_rate(&revenues) * 100.0,
        }
    }
}
