// lectern-core/src/core/validate.rs
// ============================================================================
// Module: Lectern Field Validation
// Description: Field-level validation rules and the validation error type.
// Purpose: Enforce catalog field constraints before rows reach the gateway.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Field rules for catalog payloads: required text capped at 255 characters,
//! optional text with the same cap, and inclusive integer bounds. Violations
//! are collected per field so a caller sees every problem in one response,
//! and an operation that fails validation persists nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length for short text fields (name, location, title, author).
pub const MAX_TEXT_LENGTH: usize = 255;

/// Lowest accepted publication year.
pub const MIN_PUBLISHED_YEAR: i32 = 1000;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field name as it appears in the request payload.
    pub field: &'static str,
    /// Human-readable constraint description.
    pub message: String,
}

impl FieldViolation {
    /// Builds a violation for the given field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Joins violations into a single diagnostic line.
fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.field, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validation failure carrying every field violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    /// Field violations in payload order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Builds a validation error from collected violations.
    #[must_use]
    pub const fn new(violations: Vec<FieldViolation>) -> Self {
        Self {
            violations,
        }
    }
}

// ============================================================================
// SECTION: Field Rules
// ============================================================================

/// Checks a required text field: present, non-empty, and within
/// [`MAX_TEXT_LENGTH`].
///
/// # Errors
///
/// Returns a [`FieldViolation`] when the field is missing, empty, or too
/// long.
pub fn required_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<String, FieldViolation> {
    match value {
        None => Err(FieldViolation::new(field, "is required")),
        Some(text) if text.is_empty() => Err(FieldViolation::new(field, "is required")),
        Some(text) if text.chars().count() > MAX_TEXT_LENGTH => Err(FieldViolation::new(
            field,
            format!("must not exceed {MAX_TEXT_LENGTH} characters"),
        )),
        Some(text) => Ok(text.to_string()),
    }
}

/// Checks a required text field with no length cap (page content).
///
/// # Errors
///
/// Returns a [`FieldViolation`] when the field is missing or empty.
pub fn required_body(
    field: &'static str,
    value: Option<&str>,
) -> Result<String, FieldViolation> {
    match value {
        None => Err(FieldViolation::new(field, "is required")),
        Some(text) if text.is_empty() => Err(FieldViolation::new(field, "is required")),
        Some(text) => Ok(text.to_string()),
    }
}

/// Checks an optional text field: absent is fine, present values must fit
/// [`MAX_TEXT_LENGTH`].
///
/// # Errors
///
/// Returns a [`FieldViolation`] when a supplied value is too long.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, FieldViolation> {
    match value {
        None => Ok(None),
        Some(text) if text.chars().count() > MAX_TEXT_LENGTH => Err(FieldViolation::new(
            field,
            format!("must not exceed {MAX_TEXT_LENGTH} characters"),
        )),
        Some(text) => Ok(Some(text.to_string())),
    }
}

/// Checks a required integer field with an inclusive lower bound.
///
/// # Errors
///
/// Returns a [`FieldViolation`] when the field is missing or below `min`.
pub fn int_at_least(
    field: &'static str,
    value: Option<i32>,
    min: i32,
) -> Result<i32, FieldViolation> {
    match value {
        None => Err(FieldViolation::new(field, "is required")),
        Some(number) if number < min => {
            Err(FieldViolation::new(field, format!("must be at least {min}")))
        }
        Some(number) => Ok(number),
    }
}

/// Checks a required integer field against an inclusive range.
///
/// # Errors
///
/// Returns a [`FieldViolation`] when the field is missing or outside
/// `[min, max]`.
pub fn int_within(
    field: &'static str,
    value: Option<i32>,
    min: i32,
    max: i32,
) -> Result<i32, FieldViolation> {
    match value {
        None => Err(FieldViolation::new(field, "is required")),
        Some(number) if number < min => {
            Err(FieldViolation::new(field, format!("must be at least {min}")))
        }
        Some(number) if number > max => {
            Err(FieldViolation::new(field, format!("must not be greater than {max}")))
        }
        Some(number) => Ok(number),
    }
}

/// Pushes a rule failure onto the violation list, passing successes through.
pub(crate) fn collect<T>(
    result: Result<T, FieldViolation>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}
