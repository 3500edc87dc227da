//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use jobconnect_core::domain::{
    Application, ApplicationStatus, EmploymentType, JobDescription, JobOffer, JobOfferStatus,
};
use jobconnect_core::error::{ErrorCode, JobConnectError, Result};
use jobconnect_core::notify::{Notification, Notifier};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn create_test_offer(company: &str, title: &str, views: i32) -> JobOffer {
    JobOffer {
        id: Uuid::new_v4(),
        version: 0,
        company: company.to_string(),
        publication_date: Some(date(2030, 1, 1)),
        expiration_date: date(2099, 12, 31),
        views_count: views,
        status: JobOfferStatus::Active,
        description: JobDescription {
            id: Uuid::new_v4(),
            title: title.to_string(),
            location: "Karlsruhe".to_string(),
            salary: Decimal::new(6_500_000, 2),
            summary: "Build and run the backend services".to_string(),
            responsibilities: "Design services and keep them running".to_string(),
            requirements: "Several years of backend experience".to_string(),
            employment: EmploymentType::FullTime,
        },
        applications: Vec::new(),
    }
}

pub fn create_test_application(applicant: &str) -> Application {
    Application {
        id: Uuid::new_v4(),
        applicant: applicant.to_string(),
        resume: Url::parse("https://cv.example.com/resume.pdf").unwrap(),
        cover_letter: None,
        date: date(2025, 6, 1),
        documents: vec![Url::parse("https://cv.example.com/certificate.pdf").unwrap()],
        status: ApplicationStatus::Submitted,
    }
}

/// Notifier that keeps what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    /// Wait until `count` notifications were handed over, or give up after a second.
    pub async fn wait_for(&self, count: usize) -> Vec<Notification> {
        for _ in 0..100 {
            if self.sent.lock().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        self.sent.lock().push(notification.clone());
        if self.fail {
            return Err(JobConnectError::new(
                ErrorCode::NotificationFailed,
                "Relay unavailable",
            ));
        }
        Ok(())
    }
}

pub fn recording_notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::default())
}
