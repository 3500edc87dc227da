use async_trait::async_trait;
use parking_lot::RwLock;

use super::{FetchGraph, JobOfferStore, UpdateOutcome};
use crate::domain::{JobOffer, JobOfferId};
use crate::error::{JobConnectError, Result};
use crate::pagination::{Page, PageRequest};
use crate::query::Predicate;

/// In-memory store for development and testing.
///
/// Offers are kept in insertion order. All checks and writes happen under a
/// single write guard, so conditional updates are linearizable.
#[derive(Default)]
pub struct InMemoryStore {
    offers: RwLock<Vec<JobOffer>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored offers.
    pub fn len(&self) -> usize {
        self.offers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.read().is_empty()
    }
}

fn project(offer: &JobOffer, graph: FetchGraph) -> JobOffer {
    match graph {
        FetchGraph::DescriptionAndApplications => offer.clone(),
        FetchGraph::Description => JobOffer {
            applications: Vec::new(),
            ..offer.clone()
        },
    }
}

fn same_company_and_title(offer: &JobOffer, company: &str, title: &str) -> bool {
    offer.company == company && offer.title() == title
}

#[async_trait]
impl JobOfferStore for InMemoryStore {
    async fn fetch_page(
        &self,
        predicate: Option<&Predicate>,
        page: &PageRequest,
    ) -> Result<Page<JobOffer>> {
        let offers = self.offers.read();
        let matching: Vec<&JobOffer> = offers
            .iter()
            .filter(|offer| predicate.map_or(true, |p| p.matches(offer)))
            .collect();

        let total = matching.len() as u64;
        let content = page
            .paginate_iter(matching.into_iter())
            .into_iter()
            .map(|offer| project(offer, FetchGraph::Description))
            .collect();
        Ok(Page::new(content, page, total))
    }

    async fn fetch_by_company_prefix(
        &self,
        prefix: &str,
        page: &PageRequest,
    ) -> Result<Page<JobOffer>> {
        let prefix = prefix.to_lowercase();
        let offers = self.offers.read();
        let mut matching: Vec<&JobOffer> = offers
            .iter()
            .filter(|offer| offer.company.to_lowercase().starts_with(&prefix))
            .collect();
        matching.sort_by(|a, b| a.company.cmp(&b.company));

        let total = matching.len() as u64;
        let content = page
            .paginate_iter(matching.into_iter())
            .into_iter()
            .map(|offer| project(offer, FetchGraph::Description))
            .collect();
        Ok(Page::new(content, page, total))
    }

    async fn fetch_by_id(&self, id: JobOfferId, graph: FetchGraph) -> Result<Option<JobOffer>> {
        Ok(self
            .offers
            .read()
            .iter()
            .find(|offer| offer.id == id)
            .map(|offer| project(offer, graph)))
    }

    async fn exists_by_company_and_title(&self, company: &str, title: &str) -> Result<bool> {
        Ok(self
            .offers
            .read()
            .iter()
            .any(|offer| same_company_and_title(offer, company, title)))
    }

    async fn insert(&self, offer: &JobOffer) -> Result<()> {
        let mut offers = self.offers.write();
        if offers.iter().any(|o| o.id == offer.id) {
            return Err(JobConnectError::with_internal(
                crate::error::ErrorCode::DuplicateRecord,
                "A record with this identifier already exists",
                format!("job offer {} already stored", offer.id),
            ));
        }
        if offers
            .iter()
            .any(|o| same_company_and_title(o, &offer.company, offer.title()))
        {
            return Err(JobConnectError::job_offer_exists(&offer.company, offer.title()));
        }
        offers.push(offer.clone());
        Ok(())
    }

    async fn update_if_version(
        &self,
        offer: &JobOffer,
        expected_version: i32,
    ) -> Result<UpdateOutcome> {
        let mut offers = self.offers.write();
        let Some(stored) = offers.iter_mut().find(|o| o.id == offer.id) else {
            return Ok(UpdateOutcome::Stale);
        };
        if stored.version != expected_version {
            return Ok(UpdateOutcome::Stale);
        }

        stored.company.clone_from(&offer.company);
        stored.publication_date = offer.publication_date;
        stored.expiration_date = offer.expiration_date;
        stored.views_count = stored.views_count.max(offer.views_count);
        stored.status = offer.status;
        stored.version = expected_version + 1;

        Ok(UpdateOutcome::Updated(JobOffer {
            version: stored.version,
            views_count: stored.views_count,
            ..offer.clone()
        }))
    }

    async fn delete_by_id(&self, id: JobOfferId) -> Result<bool> {
        let mut offers = self.offers.write();
        let before = offers.len();
        offers.retain(|offer| offer.id != id);
        Ok(offers.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Application, ApplicationStatus, EmploymentType, JobDescription, JobOfferStatus,
    };
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn offer(company: &str, title: &str, views: i32) -> JobOffer {
        JobOffer {
            id: Uuid::new_v4(),
            version: 0,
            company: company.to_string(),
            publication_date: None,
            expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            views_count: views,
            status: JobOfferStatus::Active,
            description: JobDescription {
                id: Uuid::new_v4(),
                title: title.to_string(),
                location: "Remote".to_string(),
                salary: Decimal::new(100, 0),
                summary: "A summary that is long enough".to_string(),
                responsibilities: "Responsibilities long enough".to_string(),
                requirements: "Requirements long enough too".to_string(),
                employment: EmploymentType::Contract,
            },
            applications: vec![Application {
                id: Uuid::new_v4(),
                applicant: "Jane Doe".to_string(),
                resume: "https://cv.example.com/jane.pdf".parse().unwrap(),
                cover_letter: None,
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                documents: Vec::new(),
                status: ApplicationStatus::Submitted,
            }],
        }
    }

    #[tokio::test]
    async fn test_fetch_graph_controls_applications() {
        let store = InMemoryStore::new();
        let stored = offer("Acme", "Engineer", 0);
        store.insert(&stored).await.unwrap();

        let shallow = store
            .fetch_by_id(stored.id, FetchGraph::Description)
            .await
            .unwrap()
            .unwrap();
        assert!(shallow.applications.is_empty());

        let deep = store
            .fetch_by_id(stored.id, FetchGraph::DescriptionAndApplications)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deep.applications.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_company_and_title() {
        let store = InMemoryStore::new();
        store.insert(&offer("Acme", "Engineer", 0)).await.unwrap();

        let error = store
            .insert(&offer("Acme", "Engineer", 0))
            .await
            .unwrap_err();
        assert_eq!(error.code(), ErrorCode::DuplicateRecord);
        assert_eq!(store.len(), 1);

        store.insert(&offer("Acme", "Designer", 0)).await.unwrap();
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_page_filters_and_pages() {
        let store = InMemoryStore::new();
        for views in 0..7 {
            store
                .insert(&offer("Acme", &format!("Role {views}"), views))
                .await
                .unwrap();
        }

        let predicate = Predicate::MinViews(2);
        let page = store
            .fetch_page(Some(&predicate), &PageRequest::new(0, 3))
            .await
            .unwrap();
        assert_eq!(page.page.total_elements, 5);
        assert_eq!(page.page.total_pages, 2);
        assert_eq!(page.content.len(), 3);
        assert_eq!(page.content[0].views_count, 2);
        assert!(page.content.iter().all(|o| o.applications.is_empty()));
    }

    #[tokio::test]
    async fn test_company_prefix_is_case_insensitive_and_sorted() {
        let store = InMemoryStore::new();
        store.insert(&offer("Acme West", "A", 0)).await.unwrap();
        store.insert(&offer("Globex", "B", 0)).await.unwrap();
        store.insert(&offer("ACME", "C", 0)).await.unwrap();

        let page = store
            .fetch_by_company_prefix("acm", &PageRequest::first())
            .await
            .unwrap();
        let companies: Vec<_> = page.content.iter().map(|o| o.company.as_str()).collect();
        assert_eq!(companies, vec!["ACME", "Acme West"]);
    }

    #[tokio::test]
    async fn test_update_if_version_is_compare_and_swap() {
        let store = InMemoryStore::new();
        let mut stored = offer("Acme", "Engineer", 0);
        store.insert(&stored).await.unwrap();

        stored.views_count = 9;
        let outcome = store.update_if_version(&stored, 0).await.unwrap();
        let UpdateOutcome::Updated(updated) = outcome else {
            panic!("expected update");
        };
        assert_eq!(updated.version, 1);

        assert_eq!(
            store.update_if_version(&stored, 0).await.unwrap(),
            UpdateOutcome::Stale
        );

        let reloaded = store
            .fetch_by_id(stored.id, FetchGraph::DescriptionAndApplications)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.version, 1);
        assert_eq!(reloaded.views_count, 9);
        assert_eq!(reloaded.applications.len(), 1);

        stored.views_count = 2;
        let UpdateOutcome::Updated(updated) = store.update_if_version(&stored, 1).await.unwrap()
        else {
            panic!("expected update");
        };
        assert_eq!(updated.views_count, 9);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = InMemoryStore::new();
        let stored = offer("Acme", "Engineer", 0);
        store.insert(&stored).await.unwrap();

        assert!(store.delete_by_id(stored.id).await.unwrap());
        assert!(!store.delete_by_id(stored.id).await.unwrap());
        assert!(store.is_empty());
    }
}
