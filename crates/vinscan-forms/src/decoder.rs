//! VIN decoding collaborator

use crate::error::{FormError, FormResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use vinscan_core::utils::is_decodable_vin;

/// Everything a decode reports about a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedVehicle {
    /// VIN as entered
    pub vin: String,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Model year
    pub year: i32,
    /// Trim level
    pub trim: String,
    /// Engine description
    pub engine: String,
    /// Transmission type
    pub transmission: String,
    /// Driven wheels
    pub drivetrain: String,
    /// Body style
    pub body_style: String,
    /// Fuel type
    pub fuel_type: String,
    /// Country of manufacture
    pub country: String,
    /// Manufacturer company
    pub manufacturer: String,
    /// Assembly plant
    pub plant: String,
    /// Whether the VIN has the right length
    pub is_valid: bool,
}

/// Turns a VIN into vehicle details
#[async_trait]
pub trait VinDecoder: Send + Sync + fmt::Debug {
    /// Decode `vin`
    async fn decode(&self, vin: &str) -> FormResult<DecodedVehicle>;

    /// Decoder name for logs
    fn name(&self) -> &str;
}

/// Returns the same Honda Civic for every VIN
#[derive(Debug, Clone, Default)]
pub struct MockVinDecoder {
    failure: Option<String>,
}

impl MockVinDecoder {
    /// Create a decoder that always succeeds
    pub const fn new() -> Self {
        Self { failure: None }
    }

    /// Configure to fail every decode
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl VinDecoder for MockVinDecoder {
    async fn decode(&self, vin: &str) -> FormResult<DecodedVehicle> {
        if let Some(message) = &self.failure {
            return Err(FormError::decoder(message.clone()));
        }

        Ok(DecodedVehicle {
            vin: vin.to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2021,
            trim: "EX".to_string(),
            engine: "1.5L 4-Cylinder Turbo".to_string(),
            transmission: "CVT".to_string(),
            drivetrain: "FWD".to_string(),
            body_style: "Sedan".to_string(),
            fuel_type: "Gasoline".to_string(),
            country: "United States".to_string(),
            manufacturer: "Honda Motor Co.".to_string(),
            plant: "Marysville, OH".to_string(),
            is_valid: is_decodable_vin(vin),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_mock_decoder_fixed_vehicle() {
        let vehicle = MockVinDecoder::new()
            .decode("WBXHT910X0WW12345")
            .await
            .unwrap();

        assert_eq!(vehicle.vin, "WBXHT910X0WW12345");
        assert_eq!(vehicle.make, "Honda");
        assert_eq!(vehicle.model, "Civic");
        assert_eq!(vehicle.plant, "Marysville, OH");
        assert!(vehicle.is_valid);
    }

    #[tokio::test]
    async fn test_mock_decoder_validity_is_length_only() {
        let vehicle = MockVinDecoder::new().decode("SHORT").await.unwrap();
        assert!(!vehicle.is_valid);
    }

    #[tokio::test]
    async fn test_mock_decoder_failure() {
        let err = MockVinDecoder::new()
            .with_failure("service down")
            .decode("1HGBH41JXMN109186")
            .await
            .unwrap_err();
        assert_eq!(err, FormError::decoder("service down"));
    }
}
