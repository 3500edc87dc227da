//! Persistence of job offer aggregates.
//!
//! [`JobOfferStore`] is the boundary the services talk to. Two backends ship
//! with the crate: [`InMemoryStore`] for development and tests, and
//! [`PostgresStore`] backed by sqlx.
//!
//! Every method that writes treats the aggregate (offer, description and
//! applications) as one unit: readers never observe a partial insert or
//! delete.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{JobOffer, JobOfferId};
use crate::error::Result;
use crate::pagination::{Page, PageRequest};
use crate::query::Predicate;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// How much of the aggregate to load with an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchGraph {
    /// Offer and description; `applications` is left empty.
    Description,
    /// Offer, description and all applications in order.
    DescriptionAndApplications,
}

impl FetchGraph {
    pub fn with_applications(load: bool) -> Self {
        if load {
            Self::DescriptionAndApplications
        } else {
            Self::Description
        }
    }
}

/// Result of a conditional update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The write went through; the offer carries its new version.
    Updated(JobOffer),
    /// The stored version no longer equals the expected one, or the record
    /// is gone.
    Stale,
}

/// Storage backend for job offers.
#[async_trait]
pub trait JobOfferStore: Send + Sync {
    /// One page of offers matching `predicate` (all offers when `None`),
    /// loaded with [`FetchGraph::Description`].
    async fn fetch_page(&self, predicate: Option<&Predicate>, page: &PageRequest)
        -> Result<Page<JobOffer>>;

    /// One page of offers whose company starts with `prefix` ignoring case,
    /// ordered by company.
    async fn fetch_by_company_prefix(&self, prefix: &str, page: &PageRequest)
        -> Result<Page<JobOffer>>;

    async fn fetch_by_id(&self, id: JobOfferId, graph: FetchGraph) -> Result<Option<JobOffer>>;

    async fn exists_by_company_and_title(&self, company: &str, title: &str) -> Result<bool>;

    /// Persist a new aggregate.
    ///
    /// Fails with [`ErrorCode::DuplicateRecord`](crate::error::ErrorCode) when
    /// the id or the company/title pair is already taken.
    async fn insert(&self, offer: &JobOffer) -> Result<()>;

    /// Overwrite the scalar fields of `offer` if the stored version still
    /// equals `expected_version`, bumping the version by one.
    async fn update_if_version(&self, offer: &JobOffer, expected_version: i32)
        -> Result<UpdateOutcome>;

    /// Remove the aggregate. Returns whether it existed.
    async fn delete_by_id(&self, id: JobOfferId) -> Result<bool>;
}
