//! Validation error types
//!
//! Validation happens before any network call. Each failing field produces a
//! [`FieldError`] so a form can show the message inline next to the input.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field (e.g. `modeloOriginal`)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All validation failures collected for one payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed: {}", summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Merge the outcome of a single-field check
    pub fn check(&mut self, result: Result<(), FieldError>) {
        if let Err(e) = result {
            self.errors.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`, if any
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("nombre", "must not be empty");
        errors.check(Ok(()));
        errors.check(Err(FieldError {
            field: "celular".into(),
            message: "is too long".into(),
        }));

        assert_eq!(errors.errors.len(), 2);
        assert_eq!(errors.for_field("celular"), Some("is too long"));
        assert_eq!(errors.for_field("pedido"), None);
        assert!(errors.clone().into_result().is_err());
        assert_eq!(
            errors.to_string(),
            "validation failed: nombre: must not be empty; celular: is too long"
        );
    }

    #[test]
    fn test_empty_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
