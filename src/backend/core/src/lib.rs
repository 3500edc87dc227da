#![allow(clippy::result_large_err)]
//! # JobConnect Core
//!
//! Records of job offers, their descriptions and applications.
//!
//! ## Architecture
//!
//! - **Query**: compiles request parameters into a closed set of filter predicates
//! - **Version**: `ETag` tokens for optimistic concurrency on updates
//! - **Service**: read and write services over a pluggable record store
//! - **Store**: in-memory and PostgreSQL backends with atomic aggregate writes
//! - **Notify**: fire-and-forget announcements of new job offers
//! - **API**: axum routes, request validation and response models
//! - **Telemetry**: structured logging and Prometheus metrics

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod pagination;
pub mod query;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod validation;
pub mod version;

pub use error::{ErrorCode, ErrorDetails, ErrorSeverity, JobConnectError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::domain::{
        Application, ApplicationStatus, EmploymentType, JobDescription, JobOffer,
        JobOfferChanges, JobOfferId, JobOfferStatus,
    };
    pub use crate::error::{ErrorCode, JobConnectError, Result};
    pub use crate::notify::{LogNotifier, MailRelayNotifier, Notification, Notifier};
    pub use crate::pagination::{Page, PageInfo, PageRequest};
    pub use crate::query::{compile, CompileError, Predicate, SearchParams};
    pub use crate::service::{JobOfferReadService, JobOfferWriteService};
    pub use crate::store::{FetchGraph, InMemoryStore, JobOfferStore, PostgresStore, UpdateOutcome};
}
