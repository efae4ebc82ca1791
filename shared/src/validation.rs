//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! create/update payloads before they are sent to the backend.

use crate::error::{FieldError, ValidationErrors};
use rust_decimal::Decimal;

// ── Text length limits ──────────────────────────────────────────────

/// Customer, seller and campaign names
pub const MAX_NAME_LEN: usize = 200;

/// Order numbers, marketplace sale numbers
pub const MAX_ORDER_LEN: usize = 64;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 32;

/// Product models
pub const MAX_MODEL_LEN: usize = 200;

/// Free-text reasons and notes
pub const MAX_NOTE_LEN: usize = 500;

/// Payloads that can be checked before hitting the network
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn field_error(field: &str, message: String) -> FieldError {
    FieldError {
        field: field.to_string(),
        message,
    }
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error(field, format!("{field} must not be empty")));
    }
    validate_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), FieldError> {
    match value {
        Some(v) => validate_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_len(value: &str, field: &str, max_len: usize) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(field_error(
            field,
            format!("{field} is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Phone numbers: digits plus the usual separators
pub fn validate_phone(value: &str, field: &str) -> Result<(), FieldError> {
    validate_required_text(value, field, MAX_PHONE_LEN)?;
    let valid = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    if !valid {
        return Err(field_error(
            field,
            format!("{field} may only contain digits, spaces and + - ( )"),
        ));
    }
    Ok(())
}

/// Optional amounts must not be negative
pub fn validate_amount(value: Option<Decimal>, field: &str) -> Result<(), FieldError> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => Err(field_error(
            field,
            format!("{field} must not be negative, got {v}"),
        )),
        _ => Ok(()),
    }
}

/// Percentages live in `[0, 100]`
pub fn validate_percent(value: Decimal, field: &str) -> Result<(), FieldError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(field_error(
            field,
            format!("{field} must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}

/// At most one amount of an exclusive pair may be positive
pub fn validate_exclusive_amounts(
    first: Option<Decimal>,
    first_field: &str,
    second: Option<Decimal>,
    second_field: &str,
) -> Result<(), FieldError> {
    let positive = |v: Option<Decimal>| v.is_some_and(|v| v > Decimal::ZERO);
    if positive(first) && positive(second) {
        return Err(field_error(
            second_field,
            format!("{first_field} and {second_field} cannot both be set"),
        ));
    }
    Ok(())
}

/// Convenience for payloads: run all checks and collect the failures
pub fn collect(
    checks: impl IntoIterator<Item = Result<(), FieldError>>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for check in checks {
        errors.check(check);
    }
    errors.into_result()
}
