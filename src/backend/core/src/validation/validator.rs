//! Validator trait and builders for request validation.
//!
//! This module provides:
//! - `Validate` trait for synchronous validation
//! - `FieldValidator` for building field-level validation chains
//! - `RequestValidator` for validating entire request objects

use crate::validation::error::{FieldError, ValidationErrors, ValidationResult};
use crate::validation::rules::ValidationRule;

// ═══════════════════════════════════════════════════════════════════════════════
// Validate Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait for types that can be validated synchronously.
pub trait Validate {
    /// Validate this object and return any validation errors.
    fn validate(&self) -> ValidationResult<()>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Field Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// A builder for validating a single field with multiple rules.
pub struct FieldValidator<'a, T> {
    field_name: &'a str,
    value: &'a T,
    errors: Vec<FieldError>,
}

impl<'a, T> FieldValidator<'a, T> {
    pub fn new(field_name: &'a str, value: &'a T) -> Self {
        Self {
            field_name,
            value,
            errors: Vec::new(),
        }
    }

    /// Apply a validation rule.
    pub fn rule<R: ValidationRule<T>>(mut self, rule: R) -> Self {
        if let Some(error) = rule.validate(self.value) {
            self.errors.push(error);
        }
        self
    }

    /// Apply a custom validation function.
    pub fn custom<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&T) -> Option<FieldError>,
    {
        if let Some(error) = f(self.value) {
            self.errors.push(error);
        }
        self
    }

    pub fn field_name(&self) -> &str {
        self.field_name
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Request Validator
// ═══════════════════════════════════════════════════════════════════════════════

/// A builder for validating entire request objects with multiple fields.
#[derive(Default)]
pub struct RequestValidator {
    errors: ValidationErrors,
}

impl RequestValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a field and collect any errors.
    pub fn field<T>(mut self, validator: FieldValidator<'_, T>) -> Self {
        let field_name = validator.field_name().to_string();
        for error in validator.into_errors() {
            self.errors.add(&field_name, error);
        }
        self
    }

    /// Apply a custom validation function.
    pub fn custom<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ValidationErrors),
    {
        f(&mut self.errors);
        self
    }

    /// Convert to a ValidationResult.
    pub fn result(self) -> ValidationResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// Create a FieldValidator for a field.
pub fn validate_field<'a, T>(field_name: &'a str, value: &'a T) -> FieldValidator<'a, T> {
    FieldValidator::new(field_name, value)
}

/// Create a new RequestValidator.
pub fn validate_request() -> RequestValidator {
    RequestValidator::new()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{MaxLength, Min, MinLength, Required};

    struct Document {
        title: String,
        pages: i32,
    }

    impl Validate for Document {
        fn validate(&self) -> ValidationResult<()> {
            validate_request()
                .field(
                    validate_field("title", &self.title)
                        .rule(Required)
                        .rule(MaxLength(10)),
                )
                .field(validate_field("pages", &self.pages).rule(Min(1)))
                .result()
        }
    }

    #[test]
    fn test_validate_trait() {
        let valid = Document {
            title: "Contract".to_string(),
            pages: 3,
        };
        assert!(valid.validate().is_ok());

        let errors = Document {
            title: " ".to_string(),
            pages: 0,
        }
        .validate()
        .unwrap_err();
        assert!(errors.has_errors("title"));
        assert!(errors.has_errors("pages"));
    }

    #[test]
    fn test_field_validator_collects_every_failure() {
        let value = String::new();
        let validator = validate_field("title", &value)
            .rule(Required)
            .rule(MinLength(2));
        assert_eq!(validator.into_errors().len(), 2);
    }

    #[test]
    fn test_custom_rule() {
        let result = validate_request()
            .custom(|errors| errors.add_required("anything"))
            .result();
        assert!(result.unwrap_err().has_errors("anything"));
    }
}
