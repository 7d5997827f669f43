//! Core data types for VINScan Pro

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Vehicle identifier type
pub type VehicleId = u32;

/// Inventory status of a vehicle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleStatus {
    /// On the lot and for sale
    Available,
    /// Sold to a customer
    Sold,
    /// Held for a customer
    Reserved,
}

impl VehicleStatus {
    /// Every status, in display order
    pub const ALL: [Self; 3] = [Self::Available, Self::Sold, Self::Reserved];

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Sold => "Sold",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::InvalidQuery {
                parameter: "status".to_string(),
                value: s.to_string(),
            })
    }
}

/// Categorical status filter; `all` disables filtering
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    /// Keep every status
    #[default]
    All,
    /// Keep only the given status
    Only(VehicleStatus),
}

impl StatusFilter {
    /// Whether a record with `status` passes this filter
    #[must_use]
    pub fn matches(self, status: VehicleStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(&status.label().to_lowercase()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// One vehicle entry in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    /// Unique key
    pub id: VehicleId,

    /// 17-character Vehicle Identification Number
    pub vin: String,

    /// Manufacturer name
    pub make: String,

    /// Model name
    pub model: String,

    /// Model year
    pub year: i32,

    /// Exterior color
    pub color: String,

    /// Odometer reading in miles
    pub mileage: u32,

    /// Asking price in dollars
    pub price: Decimal,

    /// Inventory status
    pub status: VehicleStatus,

    /// Lot label
    pub location: String,

    /// Date the vehicle entered inventory
    pub date_added: NaiveDate,

    /// Condition grade
    pub condition: String,
}

impl VehicleRecord {
    /// "Make Model" display name
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// One month of sales analytics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSample {
    /// Month label
    pub month: String,
    /// Vehicles sold
    pub sales: u32,
    /// Revenue in dollars
    pub revenue: Decimal,
    /// Vehicles held in inventory
    pub inventory: u32,
}

/// Inventory count and value per make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeCount {
    /// Manufacturer name
    pub make: String,
    /// Vehicles of this make
    pub count: u32,
    /// Combined value in dollars
    pub value: Decimal,
}

/// Vehicles per price band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Band label
    pub range: String,
    /// Vehicles in the band
    pub count: u32,
    /// Average price in the band
    pub avg_price: Decimal,
}

/// Best selling model summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPerformer {
    /// "Make Model"
    pub model: String,
    /// Units sold
    pub sold: u32,
    /// Revenue in dollars
    pub revenue: Decimal,
    /// Average days on the lot
    pub avg_days: u32,
}

/// Per-lot utilisation summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationStat {
    /// Lot name
    pub location: String,
    /// Vehicles on the lot
    pub vehicles: u32,
    /// Utilisation percentage
    pub utilization: u32,
    /// Revenue in dollars
    pub revenue: Decimal,
}

/// A selectable option for a form field
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Categorical form values with a fixed option list
pub trait FormChoice: Sized + Copy + 'static {
    /// Every choice, in display order
    const ALL: &'static [Self];

    /// Submitted value
    fn value(self) -> &'static str;

    /// Display label
    fn label(self) -> &'static str;

    /// Option list for rendering a select control
    #[must_use]
    fn options() -> Vec<SelectOption> {
        Self::ALL
            .iter()
            .map(|choice| SelectOption {
                value: choice.value(),
                label: choice.label(),
            })
            .collect()
    }

    /// Look up a choice by its submitted value
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `field` if no choice matches.
    fn parse_value(field: &str, value: &str) -> crate::Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.value() == value)
            .ok_or_else(|| crate::Error::Validation {
                field: field.to_string(),
                message: format!("unknown option '{value}'"),
            })
    }
}

/// Size of the prospect's dealership
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DealershipSize {
    /// 1-50 vehicles
    Small,
    /// 51-200 vehicles
    Medium,
    /// 201-500 vehicles
    Large,
    /// 500+ vehicles
    Enterprise,
    /// Several rooftops
    MultiLocation,
}

impl FormChoice for DealershipSize {
    const ALL: &'static [Self] = &[
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Enterprise,
        Self::MultiLocation,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
            Self::MultiLocation => "multi-location",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Small => "Small (1-50 vehicles)",
            Self::Medium => "Medium (51-200 vehicles)",
            Self::Large => "Large (201-500 vehicles)",
            Self::Enterprise => "Enterprise (500+ vehicles)",
            Self::MultiLocation => "Multi-location",
        }
    }
}

/// Inventory system the prospect uses today
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CurrentSolution {
    /// Manual process or spreadsheets
    Manual,
    /// `AutoTrader` solutions
    Autotrader,
    /// `DealerSocket`
    Dealersocket,
    /// vAuto
    Vauto,
    /// CDK Global
    Cdk,
    /// Reynolds & Reynolds
    Reynolds,
    /// Some other system
    Other,
    /// Nothing in place
    #[serde(rename = "none")]
    NoSystem,
}

impl FormChoice for CurrentSolution {
    const ALL: &'static [Self] = &[
        Self::Manual,
        Self::Autotrader,
        Self::Dealersocket,
        Self::Vauto,
        Self::Cdk,
        Self::Reynolds,
        Self::Other,
        Self::NoSystem,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Autotrader => "autotrader",
            Self::Dealersocket => "dealersocket",
            Self::Vauto => "vauto",
            Self::Cdk => "cdk",
            Self::Reynolds => "reynolds",
            Self::Other => "other",
            Self::NoSystem => "none",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual/Spreadsheets",
            Self::Autotrader => "AutoTrader Solutions",
            Self::Dealersocket => "DealerSocket",
            Self::Vauto => "vAuto",
            Self::Cdk => "CDK Global",
            Self::Reynolds => "Reynolds & Reynolds",
            Self::Other => "Other System",
            Self::NoSystem => "No Current System",
        }
    }
}

/// How soon the prospect wants to buy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    /// Within 1 month
    Immediate,
    /// 1-3 months
    Soon,
    /// 3-6 months
    Planning,
    /// 6+ months
    Researching,
}

impl FormChoice for Urgency {
    const ALL: &'static [Self] = &[
        Self::Immediate,
        Self::Soon,
        Self::Planning,
        Self::Researching,
    ];

    fn value(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Soon => "soon",
            Self::Planning => "planning",
            Self::Researching => "researching",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediately (within 1 month)",
            Self::Soon => "Soon (1-3 months)",
            Self::Planning => "Planning (3-6 months)",
            Self::Researching => "Just researching (6+ months)",
        }
    }
}

/// Sales contact form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactSubmission {
    /// First name (required)
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    /// Last name (required)
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    /// Email address (required)
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email must be a valid address")
    )]
    pub email: String,

    /// Company or dealership name (required)
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,

    /// Phone number (required)
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    /// Job title
    pub job_title: String,

    /// Dealership size
    pub dealership_size: Option<DealershipSize>,

    /// Current inventory solution
    pub current_solution: Option<CurrentSolution>,

    /// Purchase urgency
    pub urgency: Option<Urgency>,

    /// Free-text message
    pub message: String,
}

impl ContactSubmission {
    /// Whether the prospect wrote a message
    #[must_use]
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }

    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,

    /// Success status
    pub success: bool,

    /// Optional user-facing message
    pub message: Option<String>,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            data,
            success: true,
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a successful response with message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Error code
    pub code: String,

    /// Success status (always false for errors)
    pub success: bool,

    /// Error timestamp
    pub timestamp: DateTime<Utc>,

    /// Optional additional details
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        code: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
            timestamp: Utc::now(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn valid_submission() -> ContactSubmission {
        ContactSubmission {
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: "dana@example.com".to_string(),
            company: "Reyes Motors".to_string(),
            phone: "555-0100".to_string(),
            ..ContactSubmission::default()
        }
    }

    #[test]
    fn test_vehicle_status_display() {
        assert_eq!(VehicleStatus::Available.to_string(), "Available");
        assert_eq!(VehicleStatus::Sold.to_string(), "Sold");
        assert_eq!(VehicleStatus::Reserved.to_string(), "Reserved");
    }

    #[test]
    fn test_vehicle_status_parse_is_case_insensitive() {
        assert_eq!("available".parse::<VehicleStatus>().unwrap(), VehicleStatus::Available);
        assert_eq!("SOLD".parse::<VehicleStatus>().unwrap(), VehicleStatus::Sold);
        assert_eq!(" Reserved ".parse::<VehicleStatus>().unwrap(), VehicleStatus::Reserved);
        assert!("pending".parse::<VehicleStatus>().is_err());
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "sold".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(VehicleStatus::Sold)
        );

        let err = "archived".parse::<StatusFilter>().unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(VehicleStatus::Sold));
        assert!(StatusFilter::Only(VehicleStatus::Sold).matches(VehicleStatus::Sold));
        assert!(!StatusFilter::Only(VehicleStatus::Sold).matches(VehicleStatus::Available));
    }

    #[test]
    fn test_status_filter_serializes_as_string() {
        let filter = StatusFilter::Only(VehicleStatus::Reserved);
        assert_eq!(serde_json::to_string(&filter).unwrap(), "\"reserved\"");

        let parsed: StatusFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, StatusFilter::All);
        assert!(serde_json::from_str::<StatusFilter>("\"bogus\"").is_err());
    }

    #[test]
    fn test_display_name() {
        let vehicle = crate::fixtures::dashboard_vehicles().remove(1);
        assert_eq!(vehicle.display_name(), "Ford F-150");
    }

    #[test]
    fn test_contact_submission_requires_fields() {
        let errors = ContactSubmission::default().validate().unwrap_err();
        let fields = errors.field_errors();

        for field in ["first_name", "last_name", "email", "company", "phone"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
        assert!(!fields.contains_key("job_title"));
        assert!(!fields.contains_key("message"));
    }

    #[test]
    fn test_contact_submission_valid() {
        assert!(valid_submission().validate().is_ok());
    }

    #[test]
    fn test_contact_submission_rejects_bad_email() {
        let mut submission = valid_submission();
        submission.email = "not-an-email".to_string();

        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_contact_submission_partial_json() {
        let submission: ContactSubmission = serde_json::from_value(json!({
            "first_name": "Dana",
            "dealership_size": "multi-location",
            "current_solution": "none",
            "urgency": "soon"
        }))
        .unwrap();

        assert_eq!(submission.first_name, "Dana");
        assert_eq!(submission.dealership_size, Some(DealershipSize::MultiLocation));
        assert_eq!(submission.current_solution, Some(CurrentSolution::NoSystem));
        assert_eq!(submission.urgency, Some(Urgency::Soon));
        assert!(submission.last_name.is_empty());
        assert!(!submission.has_message());
    }

    #[test]
    fn test_form_choice_options() {
        let sizes = DealershipSize::options();
        assert_eq!(sizes.len(), 5);
        assert_eq!(sizes[0].value, "small");
        assert_eq!(sizes[4].label, "Multi-location");

        assert_eq!(CurrentSolution::options().len(), 8);
        assert_eq!(Urgency::options().len(), 4);
    }

    #[test]
    fn test_form_choice_parse_value() {
        assert_eq!(
            Urgency::parse_value("urgency", "planning").unwrap(),
            Urgency::Planning
        );
        assert!(Urgency::parse_value("urgency", "yesterday").is_err());
    }

    #[test]
    fn test_api_response_success_with_message() {
        let response = ApiResponse::success_with_message(3, "Inventory exported successfully!");
        assert!(response.success);
        assert_eq!(response.data, 3);
        assert_eq!(
            response.message.as_deref(),
            Some("Inventory exported successfully!")
        );
    }

    #[test]
    fn test_error_response_with_details() {
        let details = json!({"field": "vin"});
        let response = ErrorResponse::with_details("Invalid VIN", "INVALID_VIN", details.clone());

        assert!(!response.success);
        assert_eq!(response.code, "INVALID_VIN");
        assert_eq!(response.details, Some(details));
    }

    proptest! {
        #[test]
        fn test_form_choice_value_roundtrip(index in 0usize..8) {
            let solution = CurrentSolution::ALL[index];
            let parsed = CurrentSolution::parse_value("current_solution", solution.value()).unwrap();
            prop_assert_eq!(parsed, solution);
        }
    }
}
