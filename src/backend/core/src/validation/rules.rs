//! Validation rules for job offer payloads.
//!
//! This module provides:
//! - Required field validation
//! - String length constraints
//! - Numeric lower bounds and strictly positive decimals
//! - Regex pattern and URI format checks
//! - Calendar date constraints relative to a reference day

use crate::validation::error::{FieldError, ValidationErrorKind};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

// ═══════════════════════════════════════════════════════════════════════════════
// Validation Rule Trait
// ═══════════════════════════════════════════════════════════════════════════════

/// A validation rule that can be applied to a value.
pub trait ValidationRule<T> {
    /// Validate the value and return any errors.
    fn validate(&self, value: &T) -> Option<FieldError>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// Required Field Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates a string is present and not blank.
#[derive(Debug, Clone)]
pub struct Required;

impl ValidationRule<String> for Required {
    fn validate(&self, value: &String) -> Option<FieldError> {
        if value.trim().is_empty() {
            Some(FieldError::new(ValidationErrorKind::Required))
        } else {
            None
        }
    }
}

/// Rule that validates an optional field is present (Some).
#[derive(Debug, Clone)]
pub struct RequiredOption;

impl<T> ValidationRule<Option<T>> for RequiredOption {
    fn validate(&self, value: &Option<T>) -> Option<FieldError> {
        if value.is_none() {
            Some(FieldError::new(ValidationErrorKind::Required))
        } else {
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// String Length Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates string minimum length.
#[derive(Debug, Clone)]
pub struct MinLength(pub usize);

impl ValidationRule<String> for MinLength {
    fn validate(&self, value: &String) -> Option<FieldError> {
        let len = value.chars().count();
        if len < self.0 {
            Some(FieldError::new(ValidationErrorKind::MinLength {
                min: self.0,
                actual: len,
            }))
        } else {
            None
        }
    }
}

/// Rule that validates string maximum length.
#[derive(Debug, Clone)]
pub struct MaxLength(pub usize);

impl ValidationRule<String> for MaxLength {
    fn validate(&self, value: &String) -> Option<FieldError> {
        let len = value.chars().count();
        if len > self.0 {
            Some(FieldError::new(ValidationErrorKind::MaxLength {
                max: self.0,
                actual: len,
            }))
        } else {
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Numeric Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates minimum numeric value.
#[derive(Debug, Clone)]
pub struct Min<T>(pub T);

macro_rules! impl_min_rule {
    ($($t:ty),+) => {
        $(
            impl ValidationRule<$t> for Min<$t> {
                fn validate(&self, value: &$t) -> Option<FieldError> {
                    if *value < self.0 {
                        Some(FieldError::new(ValidationErrorKind::MinValue {
                            min: self.0.to_string(),
                            actual: value.to_string(),
                        }))
                    } else {
                        None
                    }
                }
            }
        )+
    };
}

impl_min_rule!(i32, i64, Decimal);

/// Rule that validates a decimal is strictly greater than zero.
#[derive(Debug, Clone)]
pub struct Positive;

impl ValidationRule<Decimal> for Positive {
    fn validate(&self, value: &Decimal) -> Option<FieldError> {
        if *value > Decimal::ZERO {
            None
        } else {
            Some(FieldError::new(ValidationErrorKind::NotPositive {
                actual: value.to_string(),
            }))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Format Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates against a pre-compiled regex.
///
/// Empty strings pass; pair with [`Required`] to reject them.
#[derive(Debug, Clone)]
pub struct Pattern<'r> {
    regex: &'r Regex,
}

impl<'r> Pattern<'r> {
    pub fn new(regex: &'r Regex) -> Self {
        Self { regex }
    }
}

impl ValidationRule<String> for Pattern<'_> {
    fn validate(&self, value: &String) -> Option<FieldError> {
        if value.is_empty() || self.regex.is_match(value) {
            None
        } else {
            Some(FieldError::new(ValidationErrorKind::Pattern {
                pattern: self.regex.as_str().to_string(),
            }))
        }
    }
}

/// Rule that validates a string parses as an absolute URI.
#[derive(Debug, Clone)]
pub struct Uri;

impl ValidationRule<String> for Uri {
    fn validate(&self, value: &String) -> Option<FieldError> {
        match url::Url::parse(value) {
            Ok(_) => None,
            Err(_) => Some(FieldError::new(ValidationErrorKind::InvalidUrl)),
        }
    }
}

impl ValidationRule<Option<String>> for Uri {
    fn validate(&self, value: &Option<String>) -> Option<FieldError> {
        value
            .as_ref()
            .and_then(|v| <Uri as ValidationRule<String>>::validate(self, v))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Date Rules
// ═══════════════════════════════════════════════════════════════════════════════

/// Rule that validates a date lies strictly after the reference day.
#[derive(Debug, Clone, Copy)]
pub struct Future(pub NaiveDate);

impl ValidationRule<NaiveDate> for Future {
    fn validate(&self, value: &NaiveDate) -> Option<FieldError> {
        if *value > self.0 {
            None
        } else {
            Some(FieldError::new(ValidationErrorKind::NotFuture {
                date: value.to_string(),
            }))
        }
    }
}

impl ValidationRule<Option<NaiveDate>> for Future {
    fn validate(&self, value: &Option<NaiveDate>) -> Option<FieldError> {
        value
            .as_ref()
            .and_then(|v| <Future as ValidationRule<NaiveDate>>::validate(self, v))
    }
}

/// Rule that validates a date is on or after the reference day.
#[derive(Debug, Clone, Copy)]
pub struct FutureOrPresent(pub NaiveDate);

impl ValidationRule<Option<NaiveDate>> for FutureOrPresent {
    fn validate(&self, value: &Option<NaiveDate>) -> Option<FieldError> {
        match value {
            Some(date) if *date < self.0 => Some(FieldError::new(ValidationErrorKind::InPast {
                date: date.to_string(),
            })),
            _ => None,
        }
    }
}

/// Rule that validates a date is on or before the reference day.
#[derive(Debug, Clone, Copy)]
pub struct PastOrPresent(pub NaiveDate);

impl ValidationRule<NaiveDate> for PastOrPresent {
    fn validate(&self, value: &NaiveDate) -> Option<FieldError> {
        if *value > self.0 {
            Some(FieldError::new(ValidationErrorKind::InFuture {
                date: value.to_string(),
            }))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    static COMPANY: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9\s.,-]*$").unwrap());

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_required() {
        assert!(Required.validate(&"   ".to_string()).is_some());
        assert!(Required.validate(&"Acme".to_string()).is_none());
    }

    #[test]
    fn test_length_counts_chars() {
        assert!(MaxLength(4).validate(&"Müll".to_string()).is_none());
        assert!(MinLength(20).validate(&"too short".to_string()).is_some());
    }

    #[test]
    fn test_min_i32() {
        assert!(Min(0).validate(&-1).is_some());
        assert!(Min(0).validate(&0).is_none());
    }

    #[test]
    fn test_positive_decimal() {
        assert!(Positive.validate(&Decimal::ZERO).is_some());
        assert!(Positive.validate(&Decimal::new(-5, 0)).is_some());
        assert!(Positive.validate(&Decimal::new(4250, 2)).is_none());
    }

    #[test]
    fn test_pattern() {
        let rule = Pattern::new(&COMPANY);
        assert!(rule.validate(&"Acme Corp.".to_string()).is_none());
        assert!(rule.validate(&"1Acme".to_string()).is_some());
        assert!(rule.validate(&String::new()).is_none());
    }

    #[test]
    fn test_uri() {
        assert!(Uri.validate(&"https://cv.example.com/a.pdf".to_string()).is_none());
        assert!(Uri.validate(&"not a uri".to_string()).is_some());
        assert!(Uri.validate(&None::<String>).is_none());
    }

    #[test]
    fn test_date_rules() {
        let today = day(2026, 3, 10);

        assert!(Future(today).validate(&today).is_some());
        assert!(Future(today).validate(&day(2026, 3, 11)).is_none());

        assert!(FutureOrPresent(today).validate(&Some(today)).is_none());
        assert!(FutureOrPresent(today).validate(&Some(day(2026, 3, 9))).is_some());
        assert!(FutureOrPresent(today).validate(&None).is_none());

        assert!(PastOrPresent(today).validate(&today).is_none());
        assert!(PastOrPresent(today).validate(&day(2026, 3, 11)).is_some());
    }
}
