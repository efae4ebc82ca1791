//! Money helpers using rust_decimal for precision
//!
//! Amounts are nullable `Decimal`s. Some entities carry two amounts of which
//! at most one may be set (amount paid vs. amount credited); [`set_exclusive`]
//! keeps that rule when a form field changes.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Round to cents, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `$ 1234.50`
pub fn format_money(value: Decimal) -> String {
    format!("$ {:.2}", round_money(value))
}

/// Formats `None` as an empty cell
pub fn format_optional_money(value: Option<Decimal>) -> String {
    value.map(format_money).unwrap_or_default()
}

fn is_positive(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| v > Decimal::ZERO)
}

/// Set `target` to `value`; a positive value clears `other`.
///
/// Setting `target` to empty or zero leaves `other` untouched.
pub fn set_exclusive(
    target: &mut Option<Decimal>,
    other: &mut Option<Decimal>,
    value: Option<Decimal>,
) {
    if is_positive(value) && other.is_some() {
        *other = None;
    }
    *target = value;
}
