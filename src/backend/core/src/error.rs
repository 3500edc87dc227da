//! Error handling for JobConnect.
//!
//! This module provides:
//! - A single crate error type carrying a machine-readable code
//! - HTTP status code mapping for API responses
//! - User-facing messages kept apart from internal diagnostics
//! - Error logging with tracing integration
//! - An error counter for the metrics exporter
//!
//! Errors are raised close to where they are detected and are only translated
//! into HTTP responses by the `IntoResponse` implementation at the edge.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jobconnect_core::error::{JobConnectError, Result};
//!
//! async fn load(store: &dyn JobOfferStore, id: JobOfferId) -> Result<JobOffer> {
//!     store
//!         .fetch_by_id(id, FetchGraph::Description)
//!         .await?
//!         .ok_or_else(|| JobConnectError::job_offer_not_found(id))
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::JobOfferId;
use crate::query::SearchParams;
use crate::validation::ValidationErrors;

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for JobConnect operations.
pub type Result<T> = std::result::Result<T, JobConnectError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Codes
// ═══════════════════════════════════════════════════════════════════════════════

/// Machine-readable error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Record Errors (1000-1099)
    RecordNotFound,
    DuplicateRecord,

    // Version Errors (1100-1199)
    VersionMissing,
    VersionMalformed,
    VersionOutdated,

    // Database Errors (2000-2099)
    DatabaseError,
    DatabaseConnectionFailed,
    DatabaseQueryFailed,

    // Serialization Errors (2200-2299)
    SerializationError,
    DeserializationError,

    // External Service Errors (3000-3099)
    NotificationFailed,
    ExternalServiceError,
    NetworkError,

    // Validation Errors (4100-4199)
    ValidationError,
    InvalidInput,

    // Configuration Errors (5000-5099)
    ConfigurationError,
    MissingConfiguration,
    InvalidConfiguration,
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub const fn numeric_code(&self) -> u32 {
        match self {
            Self::RecordNotFound => 1000,
            Self::DuplicateRecord => 1001,

            Self::VersionMissing => 1100,
            Self::VersionMalformed => 1101,
            Self::VersionOutdated => 1102,

            Self::DatabaseError => 2000,
            Self::DatabaseConnectionFailed => 2001,
            Self::DatabaseQueryFailed => 2002,

            Self::SerializationError => 2200,
            Self::DeserializationError => 2201,

            Self::NotificationFailed => 3000,
            Self::ExternalServiceError => 3001,
            Self::NetworkError => 3002,

            Self::ValidationError => 4100,
            Self::InvalidInput => 4101,

            Self::ConfigurationError => 5000,
            Self::MissingConfiguration => 5001,
            Self::InvalidConfiguration => 5002,
        }
    }

    /// Get the HTTP status code for this error.
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::RecordNotFound => StatusCode::NOT_FOUND,

            Self::DuplicateRecord => StatusCode::CONFLICT,

            // The caller skipped the If-Match contract entirely
            Self::VersionMissing => StatusCode::PRECONDITION_REQUIRED,

            Self::VersionMalformed | Self::VersionOutdated => StatusCode::PRECONDITION_FAILED,

            Self::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,

            Self::InvalidInput | Self::DeserializationError => StatusCode::BAD_REQUEST,

            Self::DatabaseConnectionFailed | Self::ExternalServiceError => {
                StatusCode::SERVICE_UNAVAILABLE
            }

            Self::NotificationFailed | Self::NetworkError => StatusCode::BAD_GATEWAY,

            Self::DatabaseError
            | Self::DatabaseQueryFailed
            | Self::SerializationError
            | Self::ConfigurationError
            | Self::MissingConfiguration
            | Self::InvalidConfiguration => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error is retryable by the caller without changing the request.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DatabaseConnectionFailed
                | Self::DatabaseQueryFailed
                | Self::NetworkError
                | Self::ExternalServiceError
        )
    }

    /// Get the error category for grouping.
    pub const fn category(&self) -> &'static str {
        match self.numeric_code() {
            1000..=1099 => "record",
            1100..=1199 => "version",
            2000..=2099 => "database",
            2200..=2299 => "serialization",
            3000..=3099 => "external_service",
            4100..=4199 => "validation",
            5000..=5099 => "configuration",
            9000..=9099 => "internal",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Severity
// ═══════════════════════════════════════════════════════════════════════════════

/// Severity level for errors (affects logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Client errors (bad input, stale versions, absent records)
    Low,
    /// Degraded collaborators (mail relay, network)
    Medium,
    /// System errors (database failures)
    High,
    /// Errors requiring immediate attention
    Critical,
}

impl ErrorSeverity {
    /// Get severity based on error code.
    pub const fn from_code(code: &ErrorCode) -> Self {
        match code {
            ErrorCode::RecordNotFound
            | ErrorCode::DuplicateRecord
            | ErrorCode::VersionMissing
            | ErrorCode::VersionMalformed
            | ErrorCode::VersionOutdated
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput
            | ErrorCode::DeserializationError => Self::Low,

            ErrorCode::NotificationFailed
            | ErrorCode::ExternalServiceError
            | ErrorCode::NetworkError => Self::Medium,

            ErrorCode::DatabaseError
            | ErrorCode::DatabaseQueryFailed
            | ErrorCode::SerializationError
            | ErrorCode::ConfigurationError
            | ErrorCode::MissingConfiguration
            | ErrorCode::InvalidConfiguration => Self::High,

            ErrorCode::DatabaseConnectionFailed => Self::Critical,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error Details
// ═══════════════════════════════════════════════════════════════════════════════

/// Additional structured details about an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Additional context key-value pairs
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,

    /// Related entity ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    /// Related entity type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    /// Suggested action for resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggested_action = Some(suggestion.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.context.is_empty() && self.entity_id.is_none() && self.suggested_action.is_none()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Main Error Type
// ═══════════════════════════════════════════════════════════════════════════════

/// The main error type for JobConnect.
#[derive(Error, Debug)]
pub struct JobConnectError {
    /// Machine-readable error code
    code: ErrorCode,

    /// User-friendly error message (safe to expose to clients)
    user_message: Cow<'static, str>,

    /// Detailed internal message (for logging only)
    internal_message: Option<String>,

    /// Additional structured details
    details: ErrorDetails,

    /// The source error that caused this error
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl fmt::Display for JobConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.user_message)?;
        if let Some(ref internal) = self.internal_message {
            write!(f, " (internal: {})", internal)?;
        }
        Ok(())
    }
}

impl JobConnectError {
    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new error with code and user message.
    pub fn new(code: ErrorCode, user_message: impl Into<Cow<'static, str>>) -> Self {
        let error = Self {
            code,
            user_message: user_message.into(),
            internal_message: None,
            details: ErrorDetails::default(),
            source: None,
        };
        error.record_metrics();
        error
    }

    /// Create an error with both user and internal messages.
    pub fn with_internal(
        code: ErrorCode,
        user_message: impl Into<Cow<'static, str>>,
        internal_message: impl Into<String>,
    ) -> Self {
        let mut error = Self::new(code, user_message);
        error.internal_message = Some(internal_message.into());
        error
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigurationError, message.into())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a source error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Replace the error details.
    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = details;
        self
    }

    /// Add internal message.
    pub fn with_internal_message(mut self, message: impl Into<String>) -> Self {
        self.internal_message = Some(message.into());
        self
    }

    /// Add context to details.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.details.context.insert(key.into(), v);
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the user-friendly message.
    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// Get the internal message (if any).
    pub fn internal_message(&self) -> Option<&str> {
        self.internal_message.as_deref()
    }

    /// Get the error details.
    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::from_code(&self.code)
    }

    /// The stale version a [`ErrorCode::VersionOutdated`] error was raised for.
    pub fn stale_version(&self) -> Option<i32> {
        if self.code != ErrorCode::VersionOutdated {
            return None;
        }
        self.details
            .context
            .get("version")
            .and_then(serde_json::Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Logging
    // ─────────────────────────────────────────────────────────────────────────

    /// Log this error with appropriate severity.
    pub fn log(&self) {
        let code = self.code.to_string();
        let category = self.code.category();
        let status = self.http_status().as_u16();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::High => {
                error!(
                    error_code = %code,
                    category = category,
                    http_status = status,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    source = ?self.source,
                    "Request failed"
                );
            }
            ErrorSeverity::Medium => {
                warn!(
                    error_code = %code,
                    category = category,
                    http_status = status,
                    user_message = %self.user_message,
                    internal_message = ?self.internal_message,
                    "Collaborator error"
                );
            }
            ErrorSeverity::Low => {
                debug!(
                    error_code = %code,
                    category = category,
                    http_status = status,
                    user_message = %self.user_message,
                    "Client error"
                );
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Metrics
    // ─────────────────────────────────────────────────────────────────────────

    fn record_metrics(&self) {
        counter!(
            "jobconnect_errors_total",
            "code" => self.code.to_string(),
            "category" => self.code.category().to_string(),
        )
        .increment(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// API Response
// ═══════════════════════════════════════════════════════════════════════════════

/// Error response for API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false for errors
    pub success: bool,

    /// Error information
    pub error: ErrorInfo,
}

/// Detailed error information for API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Numeric error code
    pub numeric_code: u32,

    /// User-friendly error message
    pub message: String,

    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,

    /// Timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl From<&JobConnectError> for ErrorResponse {
    fn from(error: &JobConnectError) -> Self {
        Self {
            success: false,
            error: ErrorInfo {
                code: error.code,
                numeric_code: error.code.numeric_code(),
                message: error.user_message.to_string(),
                details: if error.details.is_empty() {
                    None
                } else {
                    Some(error.details.clone())
                },
                timestamp: chrono::Utc::now(),
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Axum Integration
// ═══════════════════════════════════════════════════════════════════════════════

impl IntoResponse for JobConnectError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.http_status();
        let response = ErrorResponse::from(&self);

        (status, Json(response)).into_response()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// From Implementations for Common Error Types
// ═══════════════════════════════════════════════════════════════════════════════

impl From<sqlx::Error> for JobConnectError {
    fn from(error: sqlx::Error) -> Self {
        let (code, user_msg) = match &error {
            sqlx::Error::RowNotFound => (
                ErrorCode::RecordNotFound,
                "The requested record was not found",
            ),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("unique") || constraint.contains("pkey") {
                        return Self::with_internal(
                            ErrorCode::DuplicateRecord,
                            "A record with this identifier already exists",
                            format!("Constraint violation: {}", constraint),
                        )
                        .with_source(error);
                    }
                }
                (ErrorCode::DatabaseQueryFailed, "A database error occurred")
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => (
                ErrorCode::DatabaseConnectionFailed,
                "Unable to connect to the database",
            ),
            _ => (ErrorCode::DatabaseError, "A database error occurred"),
        };

        Self::with_internal(code, user_msg, error.to_string()).with_source(error)
    }
}

impl From<sqlx::migrate::MigrateError> for JobConnectError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        Self::with_internal(
            ErrorCode::DatabaseError,
            "Database schema migration failed",
            error.to_string(),
        )
        .with_source(error)
    }
}

impl From<serde_json::Error> for JobConnectError {
    fn from(error: serde_json::Error) -> Self {
        let code = if error.is_syntax() || error.is_data() || error.is_eof() {
            ErrorCode::DeserializationError
        } else {
            ErrorCode::SerializationError
        };

        Self::with_internal(code, "Failed to process JSON data", error.to_string()).with_source(error)
    }
}

impl From<reqwest::Error> for JobConnectError {
    fn from(error: reqwest::Error) -> Self {
        let (code, user_msg) = if error.is_timeout() || error.is_connect() {
            (ErrorCode::NetworkError, "Failed to reach the mail relay")
        } else if error.is_status() {
            (ErrorCode::NotificationFailed, "The mail relay rejected the message")
        } else {
            (ErrorCode::ExternalServiceError, "External service returned an error")
        };

        Self::with_internal(code, user_msg, error.to_string()).with_source(error)
    }
}

impl From<config::ConfigError> for JobConnectError {
    fn from(error: config::ConfigError) -> Self {
        let (code, user_msg) = match &error {
            config::ConfigError::NotFound(_) => (
                ErrorCode::MissingConfiguration,
                "Required configuration not found",
            ),
            config::ConfigError::PathParse(_) | config::ConfigError::FileParse { .. } => (
                ErrorCode::InvalidConfiguration,
                "Configuration file is invalid",
            ),
            _ => (ErrorCode::ConfigurationError, "Configuration error occurred"),
        };

        Self::with_internal(code, user_msg, error.to_string())
    }
}

impl From<ValidationErrors> for JobConnectError {
    fn from(errors: ValidationErrors) -> Self {
        Self::new(ErrorCode::ValidationError, "Request body failed validation")
            .with_context("fields", errors.to_message_map())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Convenience Constructors for Domain Errors
// ═══════════════════════════════════════════════════════════════════════════════

impl JobConnectError {
    /// No job offer exists with the given id.
    pub fn job_offer_not_found(id: JobOfferId) -> Self {
        Self::new(
            ErrorCode::RecordNotFound,
            format!("No job offer found with id {}", id),
        )
        .with_details(ErrorDetails::new().with_entity("job_offer", id.to_string()))
    }

    /// A search produced no rows, or its parameters could not be compiled.
    pub fn job_offers_not_found(params: &SearchParams) -> Self {
        let error = Self::new(ErrorCode::RecordNotFound, "No job offers found");
        if params.is_empty() {
            error
        } else {
            error.with_context("parameters", params)
        }
    }

    /// A job offer with the same company and description title already exists.
    pub fn job_offer_exists(company: &str, title: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateRecord,
            format!(
                "A job offer for company \"{}\" with title \"{}\" already exists",
                company, title
            ),
        )
        .with_context("company", company)
        .with_context("title", title)
    }

    /// An update arrived without an `If-Match` version token.
    pub fn version_missing() -> Self {
        Self::new(ErrorCode::VersionMissing, "Version number is missing")
            .with_details(ErrorDetails::new().with_suggestion("Send the ETag of the last read in If-Match"))
    }

    /// The `If-Match` token could not be decoded.
    pub fn version_malformed(token: &str) -> Self {
        Self::new(ErrorCode::VersionMalformed, format!("Invalid ETag {}", token))
            .with_context("token", token)
    }

    /// The claimed version no longer matches the stored record.
    pub fn version_outdated(version: i32) -> Self {
        Self::new(
            ErrorCode::VersionOutdated,
            format!("Version number {} is outdated", version),
        )
        .with_details(
            ErrorDetails::new()
                .with_context("version", version)
                .with_suggestion("Re-read the job offer and retry with its current ETag"),
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::RecordNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DuplicateRecord.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::VersionMissing.http_status(),
            StatusCode::PRECONDITION_REQUIRED
        );
        assert_eq!(
            ErrorCode::VersionMalformed.http_status(),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            ErrorCode::VersionOutdated.http_status(),
            StatusCode::PRECONDITION_FAILED
        );
        assert_eq!(
            ErrorCode::ValidationError.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_error_code_is_retryable() {
        assert!(ErrorCode::DatabaseConnectionFailed.is_retryable());
        assert!(!ErrorCode::VersionOutdated.is_retryable());
        assert!(!ErrorCode::RecordNotFound.is_retryable());
    }

    #[test]
    fn test_version_outdated_carries_stale_version() {
        let error = JobConnectError::version_outdated(7);
        assert_eq!(error.code(), ErrorCode::VersionOutdated);
        assert_eq!(error.stale_version(), Some(7));
        assert!(error.user_message().contains('7'));
        assert!(error.details().suggested_action.is_some());
    }

    #[test]
    fn test_stale_version_only_for_outdated() {
        let error = JobConnectError::version_malformed("\"x\"");
        assert_eq!(error.stale_version(), None);
    }

    #[test]
    fn test_duplicate_names_both_fields() {
        let error = JobConnectError::job_offer_exists("Acme", "Engineer");
        assert_eq!(error.code(), ErrorCode::DuplicateRecord);
        assert_eq!(error.details().context["company"], "Acme");
        assert_eq!(error.details().context["title"], "Engineer");
    }

    #[test]
    fn test_not_found_carries_parameters() {
        let params = SearchParams::from_pairs([("status", "bogus")]);
        let error = JobConnectError::job_offers_not_found(&params);
        assert_eq!(error.code(), ErrorCode::RecordNotFound);
        assert_eq!(
            error.details().context["parameters"]["status"][0],
            "bogus"
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let error = JobConnectError::version_missing();
        let response = ErrorResponse::from(&error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("VERSION_MISSING"));
        assert!(json.contains("1100"));
    }

    #[test]
    fn test_error_severity() {
        assert_eq!(
            ErrorSeverity::from_code(&ErrorCode::VersionOutdated),
            ErrorSeverity::Low
        );
        assert_eq!(
            ErrorSeverity::from_code(&ErrorCode::NotificationFailed),
            ErrorSeverity::Medium
        );
        assert_eq!(
            ErrorSeverity::from_code(&ErrorCode::DatabaseConnectionFailed),
            ErrorSeverity::Critical
        );
    }

    #[test]
    fn test_error_display() {
        let error = JobConnectError::with_internal(
            ErrorCode::DatabaseError,
            "Database connection failed",
            "Connection refused: localhost:5432",
        );

        let display = format!("{}", error);
        assert!(display.contains("DatabaseError"));
        assert!(display.contains("Connection refused"));
    }
}
