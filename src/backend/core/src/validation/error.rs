//! Validation error types with field-level error support.
//!
//! Errors are tracked per field path (e.g. `description.summary`,
//! `applications[0].applicant`), several per field, and serialize directly
//! into API error details.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Error Types
// ═══════════════════════════════════════════════════════════════════════════════

/// The kind of validation error that occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Field is required but was missing or blank.
    Required,
    /// String length is below the minimum.
    MinLength { min: usize, actual: usize },
    /// String length exceeds the maximum.
    MaxLength { max: usize, actual: usize },
    /// Numeric value is below the minimum.
    MinValue { min: String, actual: String },
    /// Numeric value must be greater than zero.
    NotPositive { actual: String },
    /// Value does not match the expected pattern.
    Pattern { pattern: String },
    /// Value does not parse as an absolute URI.
    InvalidUrl,
    /// Date must lie strictly after today.
    NotFuture { date: String },
    /// Date must be today or later.
    InPast { date: String },
    /// Date must be today or earlier.
    InFuture { date: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "field is required"),
            Self::MinLength { min, actual } => {
                write!(f, "must be at least {} characters (got {})", min, actual)
            }
            Self::MaxLength { max, actual } => {
                write!(f, "must be at most {} characters (got {})", max, actual)
            }
            Self::MinValue { min, actual } => {
                write!(f, "must be at least {} (got {})", min, actual)
            }
            Self::NotPositive { actual } => write!(f, "must be greater than 0 (got {})", actual),
            Self::Pattern { pattern } => write!(f, "must match pattern: {}", pattern),
            Self::InvalidUrl => write!(f, "must be a valid URI"),
            Self::NotFuture { date } => write!(f, "must be a future date (got {})", date),
            Self::InPast { date } => write!(f, "must not be in the past (got {})", date),
            Self::InFuture { date } => write!(f, "must not be in the future (got {})", date),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field Error
// ═══════════════════════════════════════════════════════════════════════════════

/// A single validation error for a specific field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// The kind of validation error.
    pub kind: ValidationErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(kind: ValidationErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Errors Collection
// ═══════════════════════════════════════════════════════════════════════════════

/// A collection of validation errors organized by field path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    #[serde(flatten)]
    errors: HashMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error for a specific field.
    pub fn add(&mut self, field: impl Into<String>, error: FieldError) {
        self.errors.entry(field.into()).or_default().push(error);
    }

    /// Add a required field error.
    pub fn add_required(&mut self, field: impl Into<String>) {
        self.add(field, FieldError::new(ValidationErrorKind::Required));
    }

    /// Get errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<FieldError>> {
        self.errors.get(field)
    }

    /// Check if a specific field has errors.
    pub fn has_errors(&self, field: &str) -> bool {
        self.errors.get(field).is_some_and(|v| !v.is_empty())
    }

    /// Merge errors with a field prefix (for nested validation).
    pub fn merge_with_prefix(&mut self, prefix: &str, other: ValidationErrors) {
        for (field, errors) in other.errors {
            let prefixed_field = if field.is_empty() {
                prefix.to_string()
            } else {
                format!("{}.{}", prefix, field)
            };
            self.errors.entry(prefixed_field).or_default().extend(errors);
        }
    }

    /// Merge errors for array items.
    pub fn merge_array_item(&mut self, field: &str, index: usize, other: ValidationErrors) {
        let prefix = format!("{}[{}]", field, index);
        self.merge_with_prefix(&prefix, other);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<FieldError>)> {
        self.errors.iter()
    }

    /// Convert to a simple map of field -> error messages.
    pub fn to_message_map(&self) -> HashMap<String, Vec<String>> {
        self.errors
            .iter()
            .map(|(field, errors)| {
                (
                    field.clone(),
                    errors.iter().map(|e| e.message.clone()).collect(),
                )
            })
            .collect()
    }

    /// Convert to a flat, field-sorted list of error messages.
    pub fn to_flat_messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .errors
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| format!("{}: {}", field, e.message))
            })
            .collect();
        messages.sort();
        messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_flat_messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Result Type
// ═══════════════════════════════════════════════════════════════════════════════

/// Result type for validation operations.
pub type ValidationResult<T> = std::result::Result<T, ValidationErrors>;

/// Extension trait for converting Option to ValidationResult.
pub trait OptionExt<T> {
    /// Convert None to a required field error.
    fn required(self, field: &str) -> ValidationResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, field: &str) -> ValidationResult<T> {
        self.ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add_required(field);
            errors
        })
    }
}
