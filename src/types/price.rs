//! Fixed-point price conversions.
//!
//! ## Representation
//!
//! A price is a `u64` count of 10^-8 units: 431.25 is stored as
//! `43_125_000_000`. The book itself never needs more than subtraction and
//! tick division on these raw integers; the conversions here exist for the
//! boundaries where prices are read or printed (the demo binary, tests,
//! logs).
//!
//! Parsing and formatting go through [`rust_decimal::Decimal`] so that
//! string round-trips are exact and no intermediate ever touches binary
//! floating point.
//!
//! ## Examples
//!
//! ```
//! use tickbook::types::price::{from_fixed, to_fixed};
//!
//! let price = to_fixed("431.25").unwrap();
//! assert_eq!(price, 43_125_000_000);
//! assert_eq!(from_fixed(price), "431.25000000");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Number of 10^-8 units in 1.0; prices carry eight decimal places.
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Parsing
// ============================================================================

/// Parse a decimal string into a fixed-point price.
///
/// Returns `None` for anything that is not a non-negative in-range decimal.
/// Digits past the eighth decimal place are rounded.
///
/// # Example
///
/// ```
/// use tickbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("0.015"), Some(1_500_000));
/// assert_eq!(to_fixed("-3"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    s.parse::<Decimal>().ok().and_then(decimal_to_fixed)
}

/// Convert a `Decimal` into a fixed-point price.
///
/// Returns `None` when the value is negative or does not fit in a `u64`
/// after scaling.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }
    let units = d.checked_mul(Decimal::from(SCALE))?;
    units.round_dp(0).to_u64()
}

// ============================================================================
// Formatting
// ============================================================================

/// View a fixed-point price as a `Decimal`.
pub fn fixed_to_decimal(value: u64) -> Decimal {
    // A fixed-point price is exactly a decimal with an 8-digit scale.
    Decimal::from_i128_with_scale(value as i128, 8)
}

/// Render a fixed-point price with all eight decimal places.
///
/// # Example
///
/// ```
/// use tickbook::types::price::from_fixed;
///
/// assert_eq!(from_fixed(1_500_000), "0.01500000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Render a fixed-point price without trailing zeros.
///
/// # Example
///
/// ```
/// use tickbook::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(200_000_000), "2");
/// assert_eq!(from_fixed_trimmed(43_125_000_000), "431.25");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    fixed_to_decimal(value).normalize().to_string()
}

// ============================================================================
// Unit Tests
// ============================================================================
