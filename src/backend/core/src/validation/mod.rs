//! Request validation framework for JobConnect.
//!
//! - **Rules**: required fields, length bounds, numeric minimums, strictly
//!   positive decimals, regex patterns, URIs and calendar date constraints
//! - **Validators**: the `Validate` trait plus `FieldValidator` and
//!   `RequestValidator` builders
//! - **Errors**: field-level errors keyed by path (`description.title`,
//!   `applications[0].resume`), serializable into API error details
//!
//! ```rust,ignore
//! impl Validate for JobDescriptionDto {
//!     fn validate(&self) -> ValidationResult<()> {
//!         validate_request()
//!             .field(validate_field("title", &self.title).rule(Required).rule(MaxLength(100)))
//!             .field(validate_field("salary", &self.salary).rule(Positive))
//!             .result()
//!     }
//! }
//! ```

pub mod error;
pub mod rules;
pub mod validator;

pub use error::{FieldError, OptionExt, ValidationErrorKind, ValidationErrors, ValidationResult};
pub use rules::{
    Future, FutureOrPresent, MaxLength, Min, MinLength, PastOrPresent, Pattern, Positive, Required,
    RequiredOption, Uri, ValidationRule,
};
pub use validator::{validate_field, validate_request, FieldValidator, RequestValidator, Validate};
