//! Filter/sort engine for vehicle tables
//!
//! Everything here is pure: callers pass a slice of records and a query and
//! get back a freshly ordered copy. Records are never mutated and no state is
//! kept between calls.

use crate::types::{StatusFilter, VehicleRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column a vehicle table can be ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Record id
    Id,
    /// VIN
    Vin,
    /// Manufacturer
    Make,
    /// Model name
    Model,
    /// Model year
    Year,
    /// Exterior color
    Color,
    /// Odometer reading
    Mileage,
    /// Asking price
    Price,
    /// Inventory status
    Status,
    /// Lot label
    Location,
    /// Date entered inventory
    #[default]
    DateAdded,
    /// Condition grade
    Condition,
}

impl SortField {
    /// Every sortable column
    pub const ALL: [Self; 12] = [
        Self::Id,
        Self::Vin,
        Self::Make,
        Self::Model,
        Self::Year,
        Self::Color,
        Self::Mileage,
        Self::Price,
        Self::Status,
        Self::Location,
        Self::DateAdded,
        Self::Condition,
    ];

    /// Query-string name of the column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Vin => "vin",
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
            Self::Color => "color",
            Self::Mileage => "mileage",
            Self::Price => "price",
            Self::Status => "status",
            Self::Location => "location",
            Self::DateAdded => "date_added",
            Self::Condition => "condition",
        }
    }

    /// Compare two records on this column, ascending
    #[must_use]
    pub fn compare(self, a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Vin => compare_text(&a.vin, &b.vin),
            Self::Make => compare_text(&a.make, &b.make),
            Self::Model => compare_text(&a.model, &b.model),
            Self::Year => a.year.cmp(&b.year),
            Self::Color => compare_text(&a.color, &b.color),
            Self::Mileage => a.mileage.cmp(&b.mileage),
            Self::Price => a.price.cmp(&b.price),
            Self::Status => a.status.label().cmp(b.status.label()),
            Self::Location => compare_text(&a.location, &b.location),
            Self::DateAdded => a.date_added.cmp(&b.date_added),
            Self::Condition => compare_text(&a.condition, &b.condition),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = crate::Error;

    /// Accepts `date_added`, `dateAdded` and `DATE_ADDED` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|field| field.as_str().replace('_', "") == normalized)
            .ok_or_else(|| crate::Error::InvalidQuery {
                parameter: "sort".to_string(),
                value: s.to_string(),
            })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortDirection {
    /// The opposite direction
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending ordering
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(crate::Error::InvalidQuery {
                parameter: "direction".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Which record fields a free-text search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFields {
    /// VIN, make and model (dashboard)
    Core,
    /// VIN, make, model and color (inventory)
    WithColor,
}

impl SearchFields {
    /// Whether any searched field of `vehicle` contains `needle`, which must
    /// already be lower-cased
    fn contains(self, vehicle: &VehicleRecord, needle: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(needle);

        hit(&vehicle.vin)
            || hit(&vehicle.make)
            || hit(&vehicle.model)
            || (self == Self::WithColor && hit(&vehicle.color))
    }
}

/// Case-insensitive comparison with a byte-wise tiebreak so the order is total
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Whether `vehicle` matches a free-text query
#[must_use]
pub fn matches_search(vehicle: &VehicleRecord, query: &str, fields: SearchFields) -> bool {
    fields.contains(vehicle, &query.to_lowercase())
}

/// Records matching both the search query and the status filter, in input
/// order
#[must_use]
pub fn filter(
    vehicles: &[VehicleRecord],
    query: &str,
    status: StatusFilter,
    fields: SearchFields,
) -> Vec<VehicleRecord> {
    let needle = query.to_lowercase();
    vehicles
        .iter()
        .filter(|vehicle| fields.contains(vehicle, &needle) && status.matches(vehicle.status))
        .cloned()
        .collect()
}

/// Stable sort in place; equal keys keep their relative order in both
/// directions
pub fn sort(vehicles: &mut [VehicleRecord], field: SortField, direction: SortDirection) {
    vehicles.sort_by(|a, b| direction.apply(field.compare(a, b)));
}

/// Table view state: search text, status filter and sort selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryQuery {
    /// Free-text search
    pub search: String,
    /// Status filter
    pub status: StatusFilter,
    /// Sort column
    pub sort_field: SortField,
    /// Sort direction
    pub sort_direction: SortDirection,
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort_field: SortField::DateAdded,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl InventoryQuery {
    /// Column header click: same column flips direction, a new column starts
    /// ascending
    #[must_use]
    pub fn handle_sort(self, field: SortField) -> Self {
        if self.sort_field == field {
            Self {
                sort_direction: self.sort_direction.toggle(),
                ..self
            }
        } else {
            Self {
                sort_field: field,
                sort_direction: SortDirection::Asc,
                ..self
            }
        }
    }

    /// Replace the search text
    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    /// Replace the status filter
    #[must_use]
    pub fn with_status(self, status: StatusFilter) -> Self {
        Self { status, ..self }
    }

    /// Derive the ordered view of `vehicles` for this query
    #[must_use]
    pub fn apply(&self, vehicles: &[VehicleRecord], fields: SearchFields) -> Vec<VehicleRecord> {
        filter_and_sort(vehicles, self, fields)
    }
}

/// Filter then sort, recomputed from scratch every call
#[must_use]
pub fn filter_and_sort(
    vehicles: &[VehicleRecord],
    query: &InventoryQuery,
    fields: SearchFields,
) -> Vec<VehicleRecord> {
    let mut view = filter(vehicles, &query.search, query.status, fields);
    sort(&mut view, query.sort_field, query.sort_direction);
    view
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use crate::fixtures::{dashboard_vehicles, inventory_vehicles};
    use crate::types::{VehicleId, VehicleStatus};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn ids(vehicles: &[VehicleRecord]) -> Vec<VehicleId> {
        vehicles.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_default_query() {
        let query = InventoryQuery::default();
        assert_eq!(query.search, "");
        assert_eq!(query.status, StatusFilter::All);
        assert_eq!(query.sort_field, SortField::DateAdded);
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_default_view_is_newest_first() {
        let view = InventoryQuery::default().apply(&inventory_vehicles(), SearchFields::WithColor);
        // Malibu 01-22, Sonata 01-20, X3 01-18, Civic 01-15, F-150 01-10
        assert_eq!(ids(&view), vec![5, 3, 4, 1, 2]);
    }

    #[test]
    fn test_handle_sort_toggles_same_field() {
        let query = InventoryQuery::default().handle_sort(SortField::DateAdded);
        assert_eq!(query.sort_field, SortField::DateAdded);
        assert_eq!(query.sort_direction, SortDirection::Asc);

        let query = query.handle_sort(SortField::DateAdded);
        assert_eq!(query.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_handle_sort_new_field_starts_ascending() {
        let query = InventoryQuery::default()
            .with_search("honda")
            .handle_sort(SortField::Price);

        assert_eq!(query.sort_field, SortField::Price);
        assert_eq!(query.sort_direction, SortDirection::Asc);
        assert_eq!(query.search, "honda");
    }

    #[rstest]
    #[case("civic", vec![1])]
    #[case("CIVIC", vec![1])]
    #[case("1ftfw", vec![2])]
    #[case("red", vec![5])]
    #[case("o", vec![1, 2, 3, 5])]
    #[case("", vec![1, 2, 3, 4, 5])]
    #[case("tesla", vec![])]
    fn test_inventory_search(#[case] query: &str, #[case] expected: Vec<VehicleId>) {
        let view = filter(
            &inventory_vehicles(),
            query,
            StatusFilter::All,
            SearchFields::WithColor,
        );
        assert_eq!(ids(&view), expected);
    }

    #[test]
    fn test_dashboard_search_ignores_color() {
        let vehicles = dashboard_vehicles();
        assert!(filter(&vehicles, "silver", StatusFilter::All, SearchFields::Core).is_empty());
        assert_eq!(
            ids(&filter(&vehicles, "silver", StatusFilter::All, SearchFields::WithColor)),
            vec![1]
        );
    }

    #[test]
    fn test_dashboard_available_filter_keeps_only_civic() {
        let status: StatusFilter = "available".parse().unwrap();
        let view = filter(&dashboard_vehicles(), "", status, SearchFields::Core);

        assert_eq!(view.len(), 1);
        assert_eq!(view[0].model, "Civic");
    }

    #[rstest]
    #[case("Available", vec![1, 4, 5])]
    #[case("sold", vec![2])]
    #[case("RESERVED", vec![3])]
    #[case("all", vec![1, 2, 3, 4, 5])]
    fn test_status_filter(#[case] status: &str, #[case] expected: Vec<VehicleId>) {
        let view = filter(
            &inventory_vehicles(),
            "",
            status.parse().unwrap(),
            SearchFields::WithColor,
        );
        assert_eq!(ids(&view), expected);
    }

    #[rstest]
    #[case(SortField::Price, SortDirection::Asc, vec![1, 5, 3, 2, 4])]
    #[case(SortField::Price, SortDirection::Desc, vec![4, 2, 3, 5, 1])]
    #[case(SortField::Year, SortDirection::Asc, vec![4, 2, 1, 3, 5])]
    #[case(SortField::Mileage, SortDirection::Asc, vec![5, 3, 1, 4, 2])]
    #[case(SortField::Make, SortDirection::Asc, vec![4, 5, 2, 1, 3])]
    #[case(SortField::Status, SortDirection::Asc, vec![1, 4, 5, 3, 2])]
    #[case(SortField::Status, SortDirection::Desc, vec![2, 3, 1, 4, 5])]
    fn test_sort(
        #[case] field: SortField,
        #[case] direction: SortDirection,
        #[case] expected: Vec<VehicleId>,
    ) {
        let mut vehicles = inventory_vehicles();
        sort(&mut vehicles, field, direction);
        assert_eq!(ids(&vehicles), expected);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let mut vehicles = inventory_vehicles();
        vehicles[0].make = "audi".to_string();
        sort(&mut vehicles, SortField::Make, SortDirection::Asc);
        assert_eq!(vehicles[0].make, "audi");
        assert_eq!(vehicles[1].make, "BMW");
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let vehicles = inventory_vehicles();
        let query = InventoryQuery::default().handle_sort(SortField::Price);
        let _ = query.apply(&vehicles, SearchFields::WithColor);
        assert_eq!(vehicles, inventory_vehicles());
    }

    #[rstest]
    #[case("date_added", SortField::DateAdded)]
    #[case("dateAdded", SortField::DateAdded)]
    #[case("PRICE", SortField::Price)]
    #[case("vin", SortField::Vin)]
    fn test_sort_field_parse(#[case] input: &str, #[case] expected: SortField) {
        assert_eq!(input.parse::<SortField>().unwrap(), expected);
    }

    #[test]
    fn test_sort_field_parse_rejects_unknown() {
        let err = "horsepower".parse::<SortField>().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidQuery { ref parameter, .. } if parameter == "sort"));
        assert!("up".parse::<SortDirection>().is_err());
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
    }

    fn arb_vehicles() -> impl Strategy<Value = Vec<VehicleRecord>> {
        let makes = ["Honda", "ford", "BMW", "Hyundai", "Chevrolet"];
        prop::collection::vec(
            (0usize..5, 1990i32..2025, 0u32..200_000, 0i64..100_000, 0usize..3, 1u32..28),
            0..24,
        )
        .prop_map(move |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(index, (make, year, mileage, price, status, day))| VehicleRecord {
                    id: index as VehicleId + 1,
                    vin: format!("TESTVIN{index:010}"),
                    make: makes[make].to_string(),
                    model: format!("Model {}", make * 7 % 5),
                    year,
                    color: ["Red", "Blue", "Silver"][status].to_string(),
                    mileage,
                    price: Decimal::from(price),
                    status: VehicleStatus::ALL[status],
                    location: format!("Lot {}", ["A", "B", "C"][make % 3]),
                    date_added: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    condition: "Good".to_string(),
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_vin_substring_keeps_record(
            index in 0usize..5,
            start in 0usize..17,
            len in 1usize..17,
        ) {
            let vehicles = inventory_vehicles();
            let vin = &vehicles[index].vin;
            let end = (start + len).min(vin.len());
            prop_assume!(start < end);

            let view = filter(&vehicles, &vin[start..end], StatusFilter::All, SearchFields::Core);
            prop_assert!(view.iter().any(|v| v.id == vehicles[index].id));
        }

        #[test]
        fn prop_status_all_matches_search_only(
            vehicles in arb_vehicles(),
            query in "[a-zA-Z0-9]{0,3}",
        ) {
            let with_all = filter(&vehicles, &query, StatusFilter::All, SearchFields::WithColor);
            let search_only: Vec<_> = vehicles
                .iter()
                .filter(|v| matches_search(v, &query, SearchFields::WithColor))
                .collect();
            prop_assert_eq!(with_all.len(), search_only.len());
        }

        #[test]
        fn prop_toggled_sort_reverses_unique_keys(vehicles in arb_vehicles()) {
            for field in [SortField::Id, SortField::Vin] {
                let mut asc = vehicles.clone();
                sort(&mut asc, field, SortDirection::Asc);
                let mut desc = vehicles.clone();
                sort(&mut desc, field, SortDirection::Desc);

                desc.reverse();
                prop_assert_eq!(ids(&asc), ids(&desc));
            }
        }

        #[test]
        fn prop_sort_preserves_multiset(vehicles in arb_vehicles(), field_index in 0usize..12) {
            let field = SortField::ALL[field_index];
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let mut sorted = vehicles.clone();
                sort(&mut sorted, field, direction);

                let mut before = ids(&vehicles);
                let mut after = ids(&sorted);
                before.sort_unstable();
                after.sort_unstable();
                prop_assert_eq!(before, after);

                for pair in sorted.windows(2) {
                    prop_assert_ne!(direction.apply(field.compare(&pair[0], &pair[1])), Ordering::Greater);
                }
            }
        }

        #[test]
        fn prop_sort_is_stable_in_both_directions(vehicles in arb_vehicles()) {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let mut sorted = vehicles.clone();
                sort(&mut sorted, SortField::Status, direction);
                for pair in sorted.windows(2) {
                    if pair[0].status == pair[1].status {
                        prop_assert!(pair[0].id < pair[1].id);
                    }
                }
            }
        }
    }
}
