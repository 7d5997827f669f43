//! Hard-coded sample data
//!
//! Every accessor returns a fresh owned copy, so callers can filter or sort
//! without affecting anyone else. Nothing here is ever persisted.

use crate::pricing::{FaqEntry, PricingPlan};
use crate::types::{
    AnalyticsSample, LocationStat, MakeCount, PriceRange, TopPerformer, VehicleId, VehicleRecord,
    VehicleStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// VIN used by the scanner's "simulate scan" action
pub const SAMPLE_VIN: &str = "1HGBH41JXMN109186";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    id: VehicleId,
    vin: &str,
    (make, model, year): (&str, &str, i32),
    color: &str,
    mileage: u32,
    price: i64,
    status: VehicleStatus,
    location: &str,
    date_added: NaiveDate,
    condition: &str,
) -> VehicleRecord {
    VehicleRecord {
        id,
        vin: vin.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        color: color.to_string(),
        mileage,
        price: Decimal::from(price),
        status,
        location: location.to_string(),
        date_added,
        condition: condition.to_string(),
    }
}

/// The three vehicles shown on the dashboard
#[must_use]
pub fn dashboard_vehicles() -> Vec<VehicleRecord> {
    let mut vehicles = inventory_vehicles();
    vehicles.truncate(3);
    vehicles
}

/// The full inventory table
#[must_use]
pub fn inventory_vehicles() -> Vec<VehicleRecord> {
    vec![
        vehicle(
            1,
            SAMPLE_VIN,
            ("Honda", "Civic", 2021),
            "Silver",
            25_000,
            22_500,
            VehicleStatus::Available,
            "Lot A-12",
            date(2024, 1, 15),
            "Excellent",
        ),
        vehicle(
            2,
            "1FTFW1ET5DFC10312",
            ("Ford", "F-150", 2020),
            "Blue",
            45_000,
            35_000,
            VehicleStatus::Sold,
            "Lot B-05",
            date(2024, 1, 10),
            "Good",
        ),
        vehicle(
            3,
            "5NPE34AF4HH012345",
            ("Hyundai", "Sonata", 2022),
            "White",
            15_000,
            28_000,
            VehicleStatus::Reserved,
            "Lot A-08",
            date(2024, 1, 20),
            "Excellent",
        ),
        vehicle(
            4,
            "WBXHT910X0WW12345",
            ("BMW", "X3", 2019),
            "Black",
            35_000,
            42_000,
            VehicleStatus::Available,
            "Lot C-03",
            date(2024, 1, 18),
            "Very Good",
        ),
        vehicle(
            5,
            "1G1ZD5ST8HF123456",
            ("Chevrolet", "Malibu", 2023),
            "Red",
            8_000,
            26_500,
            VehicleStatus::Available,
            "Lot A-15",
            date(2024, 1, 22),
            "Like New",
        ),
    ]
}

/// Six months of sales analytics, January through June
#[must_use]
pub fn sales_series() -> Vec<AnalyticsSample> {
    [
        ("Jan", 12, 450_000, 85),
        ("Feb", 19, 680_000, 92),
        ("Mar", 15, 520_000, 78),
        ("Apr", 22, 780_000, 95),
        ("May", 28, 920_000, 88),
        ("Jun", 25, 850_000, 102),
    ]
    .into_iter()
    .map(|(month, sales, revenue, inventory)| AnalyticsSample {
        month: month.to_string(),
        sales,
        revenue: Decimal::from(revenue),
        inventory,
    })
    .collect()
}

/// Inventory count and value per make
#[must_use]
pub fn make_counts() -> Vec<MakeCount> {
    [
        ("Honda", 25, 625_000),
        ("Ford", 18, 720_000),
        ("Toyota", 22, 660_000),
        ("BMW", 12, 840_000),
        ("Chevrolet", 15, 450_000),
        ("Hyundai", 20, 520_000),
    ]
    .into_iter()
    .map(|(make, count, value)| MakeCount {
        make: make.to_string(),
        count,
        value: Decimal::from(value),
    })
    .collect()
}

/// Lot-wide vehicle counts per status
#[must_use]
pub fn status_counts() -> Vec<(VehicleStatus, u32)> {
    vec![
        (VehicleStatus::Available, 68),
        (VehicleStatus::Sold, 32),
        (VehicleStatus::Reserved, 10),
    ]
}

/// Vehicles per price band
#[must_use]
pub fn price_ranges() -> Vec<PriceRange> {
    [
        ("Under $20k", 15, 16_500),
        ("$20k-$30k", 35, 25_200),
        ("$30k-$40k", 28, 34_800),
        ("$40k-$50k", 18, 44_500),
        ("Over $50k", 14, 62_300),
    ]
    .into_iter()
    .map(|(range, count, avg_price)| PriceRange {
        range: range.to_string(),
        count,
        avg_price: Decimal::from(avg_price),
    })
    .collect()
}

/// Best selling models
#[must_use]
pub fn top_performers() -> Vec<TopPerformer> {
    [
        ("Honda Civic", 8, 180_000, 12),
        ("Ford F-150", 6, 210_000, 8),
        ("Toyota Camry", 7, 196_000, 15),
        ("BMW X3", 4, 168_000, 22),
        ("Chevrolet Malibu", 5, 132_500, 18),
    ]
    .into_iter()
    .map(|(model, sold, revenue, avg_days)| TopPerformer {
        model: model.to_string(),
        sold,
        revenue: Decimal::from(revenue),
        avg_days,
    })
    .collect()
}

/// Per-lot utilisation
#[must_use]
pub fn location_stats() -> Vec<LocationStat> {
    [
        ("Lot A", 45, 85, 1_250_000),
        ("Lot B", 38, 72, 980_000),
        ("Lot C", 27, 68, 750_000),
    ]
    .into_iter()
    .map(|(location, vehicles, utilization, revenue)| LocationStat {
        location: location.to_string(),
        vehicles,
        utilization,
        revenue: Decimal::from(revenue),
    })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Subscription plans offered on the pricing page
#[must_use]
pub fn pricing_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan {
            name: "Hero Starter".to_string(),
            description: "Perfect for small dealerships ready to begin their hero journey"
                .to_string(),
            monthly_price: 79,
            annual_price: 790,
            badge: None,
            features: strings(&[
                "Up to 25 vehicles/month",
                "Basic VIN scanning",
                "Standard inventory management",
                "Email support",
                "Mobile app access",
                "Basic reporting",
                "1 user account",
            ]),
            limitations: strings(&[
                "Limited API calls",
                "Basic analytics only",
                "No custom integrations",
            ]),
            cta: "Start Hero Trial".to_string(),
            popular: false,
        },
        PricingPlan {
            name: "Hero Professional".to_string(),
            description: "The ultimate choice for growing dealerships with superpowers"
                .to_string(),
            monthly_price: 199,
            annual_price: 1_990,
            badge: Some("Most Popular".to_string()),
            features: strings(&[
                "Up to 100 vehicles/month",
                "AI-powered VIN scanning",
                "Advanced inventory management",
                "Priority support (24/7)",
                "Mobile + web access",
                "Advanced analytics & reports",
                "Up to 5 user accounts",
                "API access included",
                "Custom integrations",
                "Automated workflows",
                "Real-time notifications",
                "Export capabilities",
            ]),
            limitations: Vec::new(),
            cta: "Become a Hero".to_string(),
            popular: true,
        },
        PricingPlan {
            name: "Hero Enterprise".to_string(),
            description: "Legendary powers for large dealerships and multi-location heroes"
                .to_string(),
            monthly_price: 399,
            annual_price: 3_990,
            badge: Some("Best Value".to_string()),
            features: strings(&[
                "Unlimited vehicles",
                "Lightning-fast AI scanning",
                "Enterprise inventory suite",
                "Dedicated hero support",
                "All platform access",
                "Custom analytics & BI",
                "Unlimited user accounts",
                "Full API access",
                "Custom integrations",
                "Advanced automation",
                "White-label options",
                "Multi-location support",
                "Custom training",
                "SLA guarantee",
            ]),
            limitations: Vec::new(),
            cta: "Contact Hero Team".to_string(),
            popular: false,
        },
    ]
}

/// Questions answered below the pricing table
#[must_use]
pub fn pricing_faq() -> Vec<FaqEntry> {
    [
        (
            "What's included in the free trial?",
            "Full access to all Hero Professional features for 14 days. No credit card required, no hidden fees. Experience the full power of VinHero risk-free.",
        ),
        (
            "Can I change plans anytime?",
            "Upgrade or downgrade your hero powers anytime. Changes take effect immediately, and we'll prorate any billing differences.",
        ),
        (
            "Is my data secure?",
            "Your data is protected by enterprise-grade security with 256-bit encryption, SOC 2 compliance, and regular security audits. We're your data fortress.",
        ),
        (
            "Do you offer training?",
            "Yes! All plans include onboarding training. Professional and Enterprise plans get dedicated training sessions to maximize your hero potential.",
        ),
    ]
    .into_iter()
    .map(|(question, answer)| FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    })
    .collect()
}
