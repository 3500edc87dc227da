//! Request and response bodies of the job offer API.
//!
//! Field names on the wire are lower case without separators
//! (`publicationdate`, `viewscount`, `coverletter`).

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationStatus, EmploymentType, JobDescription, JobOffer, JobOfferChanges,
    JobOfferId, JobOfferStatus,
};
use crate::validation::{
    validate_field, validate_request, FieldError, Future, FutureOrPresent, MaxLength, Min,
    MinLength, OptionExt, PastOrPresent, Pattern, Positive, Required, RequiredOption, Uri,
    Validate, ValidationErrorKind, ValidationErrors, ValidationResult, ValidationRule,
};

static COMPANY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9\s.,-]*$").expect("Invalid company regex")
});

static APPLICANT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s.'-]+$").expect("Invalid applicant regex"));

const MIN_COMPANY_LENGTH: usize = 2;
const MAX_COMPANY_LENGTH: usize = 100;
const MAX_TITLE_LENGTH: usize = 100;
const MAX_LOCATION_LENGTH: usize = 100;
const MIN_SUMMARY_LENGTH: usize = 20;
const MAX_SUMMARY_LENGTH: usize = 500;
const MIN_SECTION_LENGTH: usize = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════════════════════════

/// Body of `POST` and `PUT` on `/api/job-offers`.
///
/// Missing fields deserialize to empty values so that they are reported by
/// validation rather than rejected by the JSON parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobOfferDto {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub publicationdate: Option<NaiveDate>,
    #[serde(default)]
    pub expirationdate: Option<NaiveDate>,
    #[serde(default)]
    pub viewscount: i32,
    #[serde(default)]
    pub status: Option<JobOfferStatus>,
    #[serde(default)]
    pub applications: Option<Vec<ApplicationDto>>,
    #[serde(default)]
    pub description: Option<JobDescriptionDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDescriptionDto {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub responsibilities: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub employment: Option<EmploymentType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationDto {
    #[serde(default)]
    pub applicant: String,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub coverletter: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
}

impl JobOfferDto {
    /// Checks shared by create and update, relative to `today`.
    fn validate_scalars(&self, today: NaiveDate) -> ValidationResult<()> {
        let company_pattern = Pattern::new(&COMPANY_PATTERN);

        validate_request()
            .field(
                validate_field("company", &self.company)
                    .rule(Required)
                    .rule(MinLength(MIN_COMPANY_LENGTH))
                    .rule(MaxLength(MAX_COMPANY_LENGTH))
                    .rule(company_pattern),
            )
            .field(validate_field("publicationdate", &self.publicationdate).rule(FutureOrPresent(today)))
            .field(
                validate_field("expirationdate", &self.expirationdate)
                    .rule(RequiredOption)
                    .rule(Future(today)),
            )
            .field(validate_field("viewscount", &self.viewscount).rule(Min(0)))
            .field(validate_field("status", &self.status).rule(RequiredOption))
            .custom(|errors| {
                for (index, application) in self.applications.iter().flatten().enumerate() {
                    if let Err(nested) = application.validate_on(today) {
                        errors.merge_array_item("applications", index, nested);
                    }
                }
            })
            .result()
    }

    /// Validate a body for creating a job offer; the description is required.
    pub fn validate_create(&self, today: NaiveDate) -> ValidationResult<()> {
        self.validate_with_description(today, true)
    }

    /// Validate a body for overwriting a job offer.
    ///
    /// A description, if sent, is validated but not applied.
    pub fn validate_update(&self, today: NaiveDate) -> ValidationResult<()> {
        self.validate_with_description(today, false)
    }

    fn validate_with_description(&self, today: NaiveDate, required: bool) -> ValidationResult<()> {
        let mut errors = self.validate_scalars(today).err().unwrap_or_default();

        match &self.description {
            Some(description) => {
                if let Err(nested) = description.validate() {
                    errors.merge_with_prefix("description", nested);
                }
            }
            None if required => errors.add_required("description"),
            None => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and build a new job offer.
    ///
    /// Ids are generated here. A missing publication date or application
    /// date becomes `today`.
    pub fn into_job_offer(self, today: NaiveDate) -> ValidationResult<JobOffer> {
        self.validate_create(today)?;

        let expiration_date = self.expirationdate.required("expirationdate")?;
        let status = self.status.required("status")?;
        let description = self.description.required("description")?.into_description()?;
        let applications = self
            .applications
            .unwrap_or_default()
            .into_iter()
            .map(|application| application.into_application(today))
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(JobOffer {
            id: Uuid::new_v4(),
            version: 0,
            company: self.company,
            publication_date: Some(self.publicationdate.unwrap_or(today)),
            expiration_date,
            views_count: self.viewscount,
            status,
            description,
            applications,
        })
    }

    /// Validate and extract the fields an update overwrites.
    pub fn into_changes(self, today: NaiveDate) -> ValidationResult<JobOfferChanges> {
        self.validate_update(today)?;

        Ok(JobOfferChanges {
            company: self.company,
            publication_date: self.publicationdate,
            expiration_date: self.expirationdate.required("expirationdate")?,
            views_count: self.viewscount,
            status: self.status.required("status")?,
        })
    }
}

impl Validate for JobDescriptionDto {
    fn validate(&self) -> ValidationResult<()> {
        validate_request()
            .field(
                validate_field("title", &self.title)
                    .rule(Required)
                    .rule(MaxLength(MAX_TITLE_LENGTH)),
            )
            .field(
                validate_field("location", &self.location)
                    .rule(Required)
                    .rule(MaxLength(MAX_LOCATION_LENGTH)),
            )
            .field(validate_field("salary", &self.salary).rule(RequiredOption).custom(|salary| {
                salary.as_ref().and_then(|s| Positive.validate(s))
            }))
            .field(
                validate_field("summary", &self.summary)
                    .rule(Required)
                    .rule(MinLength(MIN_SUMMARY_LENGTH))
                    .rule(MaxLength(MAX_SUMMARY_LENGTH)),
            )
            .field(
                validate_field("responsibilities", &self.responsibilities)
                    .rule(Required)
                    .rule(MinLength(MIN_SECTION_LENGTH)),
            )
            .field(
                validate_field("requirements", &self.requirements)
                    .rule(Required)
                    .rule(MinLength(MIN_SECTION_LENGTH)),
            )
            .field(validate_field("employment", &self.employment).rule(RequiredOption))
            .result()
    }
}

impl JobDescriptionDto {
    fn into_description(self) -> ValidationResult<JobDescription> {
        Ok(JobDescription {
            id: Uuid::new_v4(),
            title: self.title,
            location: self.location,
            salary: self.salary.required("description.salary")?,
            summary: self.summary,
            responsibilities: self.responsibilities,
            requirements: self.requirements,
            employment: self.employment.required("description.employment")?,
        })
    }
}

impl ApplicationDto {
    /// Validate relative to `today`; the date may not lie in the future.
    pub fn validate_on(&self, today: NaiveDate) -> ValidationResult<()> {
        let applicant_pattern = Pattern::new(&APPLICANT_PATTERN);

        validate_request()
            .field(
                validate_field("applicant", &self.applicant)
                    .rule(Required)
                    .rule(applicant_pattern),
            )
            .field(validate_field("resume", &self.resume).rule(RequiredOption).rule(Uri))
            .field(validate_field("coverletter", &self.coverletter).rule(Uri))
            .field(validate_field("date", &self.date).custom(|date| {
                date.as_ref().and_then(|d| PastOrPresent(today).validate(d))
            }))
            .custom(|errors| {
                for (index, document) in self.documents.iter().enumerate() {
                    if let Some(error) = ValidationRule::<String>::validate(&Uri, document) {
                        errors.add(format!("documents[{}]", index), error);
                    }
                }
            })
            .field(validate_field("status", &self.status).rule(RequiredOption))
            .result()
    }

    fn into_application(self, today: NaiveDate) -> ValidationResult<Application> {
        let resume = self.resume.required("resume")?;
        Ok(Application {
            id: Uuid::new_v4(),
            applicant: self.applicant,
            resume: parse_uri("resume", &resume)?,
            cover_letter: self
                .coverletter
                .as_deref()
                .map(|uri| parse_uri("coverletter", uri))
                .transpose()?,
            date: self.date.unwrap_or(today),
            documents: self
                .documents
                .iter()
                .map(|uri| parse_uri("documents", uri))
                .collect::<ValidationResult<Vec<_>>>()?,
            status: self.status.required("status")?,
        })
    }
}

fn parse_uri(field: &str, value: &str) -> ValidationResult<Url> {
    Url::parse(value).map_err(|_| {
        let mut errors = ValidationErrors::new();
        errors.add(field, FieldError::new(ValidationErrorKind::InvalidUrl));
        errors
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════════════════════════

/// A job offer as returned by the API.
///
/// The version is not part of the body; it travels in the `ETag` header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobOfferModel {
    pub id: JobOfferId,
    pub company: String,
    pub publicationdate: Option<NaiveDate>,
    pub expirationdate: NaiveDate,
    pub viewscount: i32,
    pub status: JobOfferStatus,
    pub description: JobDescriptionModel,
    /// Present only when applications were loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<Vec<ApplicationModel>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptionModel {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub salary: Decimal,
    pub summary: String,
    pub responsibilities: String,
    pub requirements: String,
    pub employment: EmploymentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationModel {
    pub id: Uuid,
    pub applicant: String,
    pub resume: Url,
    pub coverletter: Option<Url>,
    pub date: NaiveDate,
    pub documents: Vec<Url>,
    pub status: ApplicationStatus,
}

impl JobOfferModel {
    pub fn from_offer(offer: JobOffer, with_applications: bool) -> Self {
        let applications = with_applications.then(|| {
            offer
                .applications
                .into_iter()
                .map(ApplicationModel::from)
                .collect()
        });

        Self {
            id: offer.id,
            company: offer.company,
            publicationdate: offer.publication_date,
            expirationdate: offer.expiration_date,
            viewscount: offer.views_count,
            status: offer.status,
            description: offer.description.into(),
            applications,
        }
    }
}

impl From<JobDescription> for JobDescriptionModel {
    fn from(description: JobDescription) -> Self {
        Self {
            id: description.id,
            title: description.title,
            location: description.location,
            salary: description.salary,
            summary: description.summary,
            responsibilities: description.responsibilities,
            requirements: description.requirements,
            employment: description.employment,
        }
    }
}

impl From<Application> for ApplicationModel {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            applicant: application.applicant,
            resume: application.resume,
            coverletter: application.cover_letter,
            date: application.date,
            documents: application.documents,
            status: application.status,
        }
    }
}
