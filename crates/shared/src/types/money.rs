//! Money helpers with fixed two-digit decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values stored as `decimal(18, 2)`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by every stored amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount representable by a `decimal(18, 2)` column.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, 2);

/// Rounds a value to two decimal places, half away from zero.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns true if the value carries no more than two fractional digits.
#[must_use]
pub fn has_money_scale(value: Decimal) -> bool {
    value.normalize().scale() <= MONEY_SCALE
}

/// Renders a value with exactly two fractional digits.
#[must_use]
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Serde adapter writing amounts as two-decimal strings (`"1650.00"`).
///
/// Use with `#[serde(with = "fintrack_shared::types::money_str")]`.
pub mod money_str {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes the value via [`super::format_money`].
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_money(*value))
    }

    /// Parses a decimal string.
    ///
    /// # Errors
    ///
    /// Fails when the input is not a decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom)
    }
}
