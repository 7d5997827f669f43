//! Utility functions for VINScan Pro

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of characters in a Vehicle Identification Number
pub const VIN_LENGTH: usize = 17;

/// Scanner input normalisation: upper-case and cap at [`VIN_LENGTH`]
/// characters
#[must_use]
pub fn normalize_vin_input(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_uppercase)
        .take(VIN_LENGTH)
        .collect()
}

/// Whether `vin` is long enough to be decoded. No checksum is checked.
#[must_use]
pub fn is_decodable_vin(vin: &str) -> bool {
    vin.chars().count() == VIN_LENGTH
}

/// Entry progress, e.g. `9/17`
#[must_use]
pub fn vin_progress(vin: &str) -> String {
    format!("{}/{VIN_LENGTH}", vin.chars().count())
}

/// Group digits in threes: `1250000` becomes `1,250,000`
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar currency, e.g. `$22,500`
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let whole = rounded.abs().mantissa().unsigned_abs();
    let whole = u64::try_from(whole).unwrap_or(u64::MAX);
    format!("{sign}${}", format_thousands(whole))
}

/// Odometer reading, e.g. `25,000 mi`
#[must_use]
pub fn format_mileage(miles: u32) -> String {
    format!("{} mi", format_thousands(u64::from(miles)))
}
