//! Queries over job offers.

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::{JobOffer, JobOfferId};
use crate::error::{JobConnectError, Result};
use crate::pagination::{Page, PageRequest};
use crate::query::{compile, SearchParams};
use crate::store::{FetchGraph, JobOfferStore};

/// Read side of the job offer service.
#[derive(Clone)]
pub struct JobOfferReadService {
    store: Arc<dyn JobOfferStore>,
}

impl JobOfferReadService {
    pub fn new(store: Arc<dyn JobOfferStore>) -> Self {
        Self { store }
    }

    /// Search job offers.
    ///
    /// Without parameters every offer is paged through, and an empty page is
    /// a valid answer. With parameters, both parameters that cannot be
    /// compiled and a search without hits are [`RecordNotFound`] carrying the
    /// parameters.
    ///
    /// [`RecordNotFound`]: crate::error::ErrorCode::RecordNotFound
    #[instrument(skip(self))]
    pub async fn find_all(&self, params: &SearchParams, page: &PageRequest) -> Result<Page<JobOffer>> {
        if params.is_empty() {
            return self.store.fetch_page(None, page).await;
        }

        let predicate = match compile(params) {
            Ok(Some(predicate)) => predicate,
            Ok(None) => return self.store.fetch_page(None, page).await,
            Err(e) => {
                debug!(error = %e, "search parameters rejected");
                return Err(JobConnectError::job_offers_not_found(params)
                    .with_internal_message(e.to_string()));
            }
        };

        let offers = self.store.fetch_page(Some(&predicate), page).await?;
        if offers.is_empty() {
            return Err(JobConnectError::job_offers_not_found(params));
        }
        debug!(total = offers.page.total_elements, "find_all");
        Ok(offers)
    }

    /// Job offers whose company starts with `prefix`, ignoring case, ordered
    /// by company.
    #[instrument(skip(self))]
    pub async fn find_by_company(&self, prefix: &str, page: &PageRequest) -> Result<Page<JobOffer>> {
        let offers = self.store.fetch_by_company_prefix(prefix, page).await?;
        if offers.is_empty() {
            return Err(JobConnectError::job_offers_not_found(&SearchParams::from_pairs([(
                "company", prefix,
            )])));
        }
        Ok(offers)
    }

    /// A single job offer, with its applications when asked for.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: JobOfferId, with_applications: bool) -> Result<JobOffer> {
        let graph = FetchGraph::with_applications(with_applications);
        let offer = self
            .store
            .fetch_by_id(id, graph)
            .await?
            .ok_or_else(|| JobConnectError::job_offer_not_found(id))?;

        debug!(version = offer.version, applications = offer.applications.len(), "find_by_id");
        Ok(offer)
    }
}
