//! Tests for the read and write services over the in-memory store.
//!
//! Tests cover:
//! - Creation with version 0 and the duplicate check
//! - Optimistic concurrency on updates, including racing writers
//! - Idempotent deletion
//! - Detached notifications

mod common;

use std::sync::Arc;

use common::{create_test_application, create_test_offer, recording_notifier, RecordingNotifier};
use jobconnect_core::domain::{JobOfferChanges, JobOfferStatus};
use jobconnect_core::error::ErrorCode;
use jobconnect_core::service::{JobOfferReadService, JobOfferWriteService};
use jobconnect_core::store::{InMemoryStore, JobOfferStore};
use uuid::Uuid;

// ============================================================================
// Test Utilities
// ============================================================================

fn services(
    notifier: Arc<RecordingNotifier>,
) -> (JobOfferReadService, JobOfferWriteService) {
    let store: Arc<dyn JobOfferStore> = Arc::new(InMemoryStore::new());
    (
        JobOfferReadService::new(store.clone()),
        JobOfferWriteService::new(store, notifier),
    )
}

fn changes(company: &str, views: i32) -> JobOfferChanges {
    JobOfferChanges {
        company: company.to_string(),
        publication_date: Some(common::date(2030, 2, 1)),
        expiration_date: common::date(2099, 6, 30),
        views_count: views,
        status: JobOfferStatus::Inactive,
    }
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_starts_at_version_zero() {
    let (read, write) = services(recording_notifier());

    let mut offer = create_test_offer("Acme", "Engineer", 17);
    offer.version = 4;
    let created = write.create(offer).await.unwrap();

    assert_eq!(created.version, 0);
    assert_eq!(created.views_count, 0);

    let stored = read.find_by_id(created.id, false).await.unwrap();
    assert_eq!(stored.version, 0);
    assert_eq!(stored.company, "Acme");
}

#[tokio::test]
async fn test_create_rejects_same_company_and_title() {
    let (_, write) = services(recording_notifier());

    write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();
    let err = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DuplicateRecord);
    assert!(err.user_message().contains("Acme"));
    assert!(err.user_message().contains("Engineer"));

    write
        .create(create_test_offer("Acme", "Designer", 0))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_announces_offer() {
    let notifier = recording_notifier();
    let (_, write) = services(notifier.clone());

    let created = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();

    let sent = notifier.wait_for(1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, format!("New job offer {}", created.id));
    assert_eq!(sent[0].text, "New job offer: Engineer");
}

#[tokio::test]
async fn test_failed_notification_does_not_fail_create() {
    let notifier = Arc::new(RecordingNotifier::failing());
    let (read, write) = services(notifier.clone());

    let created = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();

    assert_eq!(notifier.wait_for(1).await.len(), 1);
    assert!(read.find_by_id(created.id, false).await.is_ok());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_then_stale_update() {
    let (read, write) = services(recording_notifier());
    let created = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();

    let updated = write
        .update(&changes("Acme Corp", 12), created.id, 0)
        .await
        .unwrap();
    assert_eq!(updated.version, 1);
    assert_eq!(updated.company, "Acme Corp");
    assert_eq!(updated.views_count, 12);
    assert_eq!(updated.status, JobOfferStatus::Inactive);
    assert_eq!(updated.title(), "Engineer");

    let err = write
        .update(&changes("Acme Inc", 13), created.id, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::VersionOutdated);
    assert_eq!(err.stale_version(), Some(0));

    let stored = read.find_by_id(created.id, false).await.unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.company, "Acme Corp");
}

#[tokio::test]
async fn test_update_never_lowers_views() {
    let (read, write) = services(recording_notifier());
    let created = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();

    write
        .update(&changes("Acme", 10), created.id, 0)
        .await
        .unwrap();
    let updated = write
        .update(&changes("Acme", 0), created.id, 1)
        .await
        .unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.views_count, 10);

    let stored = read.find_by_id(created.id, false).await.unwrap();
    assert_eq!(stored.views_count, 10);
}

#[tokio::test]
async fn test_update_keeps_applications() {
    let (read, write) = services(recording_notifier());
    let mut offer = create_test_offer("Acme", "Engineer", 0);
    offer.applications = vec![
        create_test_application("Jane Doe"),
        create_test_application("John Roe"),
    ];
    let created = write.create(offer).await.unwrap();

    write
        .update(&changes("Acme", 1), created.id, 0)
        .await
        .unwrap();

    let stored = read.find_by_id(created.id, true).await.unwrap();
    assert_eq!(stored.applications.len(), 2);
    assert_eq!(stored.applications[0].applicant, "Jane Doe");
}

#[tokio::test]
async fn test_update_unknown_id() {
    let (_, write) = services(recording_notifier());

    let err = write
        .update(&changes("Acme", 1), Uuid::new_v4(), 0)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RecordNotFound);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_exactly_one_wins() {
    let (read, write) = services(recording_notifier());
    let created = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();

    let handles: Vec<_> = (0..2)
        .map(|i| {
            let write = write.clone();
            let id = created.id;
            tokio::spawn(async move { write.update(&changes("Acme", i), id, 0).await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    let (ok, failed): (Vec<_>, Vec<_>) = results
        .into_iter()
        .map(|joined| joined.unwrap())
        .partition(|result| result.is_ok());

    assert_eq!(ok.len(), 1);
    assert_eq!(failed.len(), 1);
    let err = failed.into_iter().next().unwrap().unwrap_err();
    assert_eq!(err.code(), ErrorCode::VersionOutdated);

    assert_eq!(read.find_by_id(created.id, false).await.unwrap().version, 1);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (read, write) = services(recording_notifier());
    let created = write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();

    write.delete_by_id(created.id).await.unwrap();
    write.delete_by_id(created.id).await.unwrap();
    write.delete_by_id(Uuid::new_v4()).await.unwrap();

    let err = read.find_by_id(created.id, true).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RecordNotFound);

    // The pair is free again once the offer is gone
    write
        .create(create_test_offer("Acme", "Engineer", 0))
        .await
        .unwrap();
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_find_by_id_loads_applications_on_request() {
    let (read, write) = services(recording_notifier());
    let mut offer = create_test_offer("Acme", "Engineer", 0);
    offer.applications = vec![create_test_application("Jane Doe")];
    let created = write.create(offer).await.unwrap();

    let without = read.find_by_id(created.id, false).await.unwrap();
    assert!(without.applications.is_empty());

    let with = read.find_by_id(created.id, true).await.unwrap();
    assert_eq!(with.applications.len(), 1);
    assert_eq!(with.applications[0].documents.len(), 1);
}
