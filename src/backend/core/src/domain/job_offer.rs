//! The job offer aggregate root.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{Application, JobDescription};

/// Identifier of a job offer.
pub type JobOfferId = Uuid;

/// Publication state of a job offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobOfferStatus {
    Active,
    Inactive,
    Closed,
}

impl JobOfferStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for JobOfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobOfferStatus {
    type Err = UnknownJobOfferStatus;

    /// Exact, case-sensitive match on the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "CLOSED" => Ok(Self::Closed),
            other => Err(UnknownJobOfferStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job offer status: {0}")]
pub struct UnknownJobOfferStatus(pub String);

/// A job offer with its description and, when loaded, its applications.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOffer {
    pub id: JobOfferId,
    /// Optimistic concurrency counter; starts at 0, incremented by every update.
    pub version: i32,
    pub company: String,
    pub publication_date: Option<NaiveDate>,
    pub expiration_date: NaiveDate,
    pub views_count: i32,
    pub status: JobOfferStatus,
    pub description: JobDescription,
    pub applications: Vec<Application>,
}

impl JobOffer {
    pub fn title(&self) -> &str {
        &self.description.title
    }

    /// Overwrite the mutable scalar fields.
    ///
    /// Description and applications are left untouched. The view count only
    /// moves up; a lower requested count keeps the current one.
    pub fn apply(&mut self, changes: &JobOfferChanges) {
        self.company.clone_from(&changes.company);
        self.publication_date = changes.publication_date;
        self.expiration_date = changes.expiration_date;
        self.views_count = self.views_count.max(changes.views_count);
        self.status = changes.status;
    }
}

/// The fields an update may overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOfferChanges {
    pub company: String,
    pub publication_date: Option<NaiveDate>,
    pub expiration_date: NaiveDate,
    pub views_count: i32,
    pub status: JobOfferStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmploymentType;
    use rust_decimal::Decimal;

    fn offer() -> JobOffer {
        JobOffer {
            id: Uuid::new_v4(),
            version: 3,
            company: "Acme".to_string(),
            publication_date: None,
            expiration_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            views_count: 12,
            status: JobOfferStatus::Active,
            description: JobDescription {
                id: Uuid::new_v4(),
                title: "Engineer".to_string(),
                location: "Karlsruhe".to_string(),
                salary: Decimal::new(5_000_000, 2),
                summary: "Build and run the backend".to_string(),
                responsibilities: "Design services and keep them running".to_string(),
                requirements: "Several years of backend experience".to_string(),
                employment: EmploymentType::FullTime,
            },
            applications: Vec::new(),
        }
    }

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!("CLOSED".parse::<JobOfferStatus>(), Ok(JobOfferStatus::Closed));
        assert!("closed".parse::<JobOfferStatus>().is_err());
        assert!("bogus".parse::<JobOfferStatus>().is_err());
    }

    #[test]
    fn test_apply_overwrites_scalars_only() {
        let mut offer = offer();
        let description = offer.description.clone();

        offer.apply(&JobOfferChanges {
            company: "Globex".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2029, 6, 1),
            expiration_date: NaiveDate::from_ymd_opt(2031, 1, 1).unwrap(),
            views_count: 40,
            status: JobOfferStatus::Closed,
        });

        assert_eq!(offer.company, "Globex");
        assert_eq!(offer.views_count, 40);
        assert_eq!(offer.status, JobOfferStatus::Closed);
        assert_eq!(offer.version, 3);
        assert_eq!(offer.description, description);
        assert_eq!(offer.title(), "Engineer");
    }

    #[test]
    fn test_apply_never_lowers_views() {
        let mut offer = offer();

        offer.apply(&JobOfferChanges {
            company: "Acme".to_string(),
            publication_date: None,
            expiration_date: offer.expiration_date,
            views_count: 0,
            status: JobOfferStatus::Active,
        });

        assert_eq!(offer.views_count, 12);
    }
}
