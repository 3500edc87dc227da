//! Creating, updating and deleting job offers.

use metrics::counter;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::{JobOffer, JobOfferChanges, JobOfferId};
use crate::error::{JobConnectError, Result};
use crate::notify::{dispatch, Notification, Notifier};
use crate::store::{FetchGraph, JobOfferStore, UpdateOutcome};

/// Write side of the job offer service.
#[derive(Clone)]
pub struct JobOfferWriteService {
    store: Arc<dyn JobOfferStore>,
    notifier: Arc<dyn Notifier>,
}

impl JobOfferWriteService {
    pub fn new(store: Arc<dyn JobOfferStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Store a new job offer and announce it.
    ///
    /// The offer starts at version 0 with no views. The announcement runs
    /// detached; its outcome does not affect the result.
    #[instrument(skip(self, offer), fields(company = %offer.company, title = %offer.title()))]
    pub async fn create(&self, mut offer: JobOffer) -> Result<JobOffer> {
        if self
            .store
            .exists_by_company_and_title(&offer.company, offer.title())
            .await?
        {
            return Err(JobConnectError::job_offer_exists(&offer.company, offer.title()));
        }

        offer.version = 0;
        offer.views_count = 0;
        self.store.insert(&offer).await?;

        counter!("jobconnect_job_offers_created_total").increment(1);
        debug!(id = %offer.id, "created");

        dispatch(self.notifier.clone(), Notification::job_offer_created(&offer));
        Ok(offer)
    }

    /// Overwrite the scalar fields of an offer, provided `version` is still
    /// current.
    ///
    /// Returns the offer carrying its new version.
    #[instrument(skip(self, changes))]
    pub async fn update(
        &self,
        changes: &JobOfferChanges,
        id: JobOfferId,
        version: i32,
    ) -> Result<JobOffer> {
        let mut offer = self
            .store
            .fetch_by_id(id, FetchGraph::Description)
            .await?
            .ok_or_else(|| JobConnectError::job_offer_not_found(id))?;

        if offer.version != version {
            debug!(current = offer.version, "stale version");
            return Err(JobConnectError::version_outdated(version));
        }

        offer.apply(changes);
        match self.store.update_if_version(&offer, version).await? {
            UpdateOutcome::Updated(updated) => {
                counter!("jobconnect_job_offers_updated_total").increment(1);
                debug!(version = updated.version, "updated");
                Ok(updated)
            }
            UpdateOutcome::Stale => {
                debug!("lost the race for the version");
                Err(JobConnectError::version_outdated(version))
            }
        }
    }

    /// Remove an offer with its description and applications.
    ///
    /// Deleting an unknown id is not an error.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: JobOfferId) -> Result<()> {
        if self.store.delete_by_id(id).await? {
            counter!("jobconnect_job_offers_deleted_total").increment(1);
            debug!("deleted");
        }
        Ok(())
    }
}
