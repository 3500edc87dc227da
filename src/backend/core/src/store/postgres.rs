//! PostgreSQL store using sqlx.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder, Transaction};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use super::{FetchGraph, JobOfferStore, UpdateOutcome};
use crate::config::DatabaseConfig;
use crate::domain::{Application, JobDescription, JobOffer, JobOfferId};
use crate::error::{JobConnectError, Result};
use crate::pagination::{Page, PageRequest};
use crate::query::{escape_like, Predicate};

const OFFER_COLUMNS: &str = r#"
    o.id, o.version, o.company, o.publication_date, o.expiration_date,
    o.views_count, o.status,
    d.id AS description_id, d.title, d.location, d.salary, d.summary,
    d.responsibilities, d.requirements, d.employment
    FROM job_offer o
    JOIN job_description d ON d.id = o.job_description_id
"#;

/// Job offer store on a Postgres connection pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new connection pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn load_applications(&self, offer_id: JobOfferId) -> Result<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationRow>(
            r#"
            SELECT id, applicant, resume, cover_letter, application_date, documents, status
            FROM application
            WHERE job_offer_id = $1
            ORDER BY idx
            "#,
        )
        .bind(offer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn fetch_rows(
        &self,
        filter: impl Fn(&mut QueryBuilder<'_, Postgres>),
        order_by: &str,
        page: &PageRequest,
    ) -> Result<Page<JobOffer>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM job_offer o WHERE ");
        filter(&mut count);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT ");
        select.push(OFFER_COLUMNS).push(" WHERE ");
        filter(&mut select);
        select
            .push(" ORDER BY ")
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(to_i64(page.limit()))
            .push(" OFFSET ")
            .push_bind(to_i64(page.offset()));

        let rows: Vec<JobOfferRow> = select.build_query_as().fetch_all(&self.pool).await?;
        let content = rows
            .into_iter()
            .map(JobOffer::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(content, page, u64::try_from(total).unwrap_or_default()))
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Serialize inserts of the same company/title pair within a transaction.
async fn lock_company_and_title(
    tx: &mut Transaction<'_, Postgres>,
    company: &str,
    title: &str,
) -> Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || chr(31) || $2))")
        .bind(company)
        .bind(title)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[async_trait]
impl JobOfferStore for PostgresStore {
    #[instrument(skip(self))]
    async fn fetch_page(
        &self,
        predicate: Option<&Predicate>,
        page: &PageRequest,
    ) -> Result<Page<JobOffer>> {
        self.fetch_rows(
            |qb| match predicate {
                Some(predicate) => predicate.push_sql(qb),
                None => {
                    qb.push("TRUE");
                }
            },
            "o.id",
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_by_company_prefix(
        &self,
        prefix: &str,
        page: &PageRequest,
    ) -> Result<Page<JobOffer>> {
        let pattern = format!("{}%", escape_like(prefix));
        self.fetch_rows(
            |qb| {
                qb.push("lower(o.company) LIKE lower(")
                    .push_bind(pattern.clone())
                    .push(") ESCAPE '\\'");
            },
            "o.company, o.id",
            page,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: JobOfferId, graph: FetchGraph) -> Result<Option<JobOffer>> {
        let row = sqlx::query_as::<_, JobOfferRow>(&format!("SELECT {} WHERE o.id = $1", OFFER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut offer = JobOffer::try_from(row)?;
        if graph == FetchGraph::DescriptionAndApplications {
            offer.applications = self.load_applications(id).await?;
        }
        Ok(Some(offer))
    }

    async fn exists_by_company_and_title(&self, company: &str, title: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM job_offer o
                JOIN job_description d ON d.id = o.job_description_id
                WHERE o.company = $1 AND d.title = $2
            )
            "#,
        )
        .bind(company)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    #[instrument(skip(self, offer), fields(id = %offer.id))]
    async fn insert(&self, offer: &JobOffer) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        lock_company_and_title(&mut tx, &offer.company, offer.title()).await?;

        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM job_offer o
                JOIN job_description d ON d.id = o.job_description_id
                WHERE o.company = $1 AND d.title = $2
            )
            "#,
        )
        .bind(&offer.company)
        .bind(offer.title())
        .fetch_one(&mut *tx)
        .await?;
        if taken {
            return Err(JobConnectError::job_offer_exists(&offer.company, offer.title()));
        }

        let d = &offer.description;
        sqlx::query(
            r#"
            INSERT INTO job_description
                (id, title, location, salary, summary, responsibilities, requirements, employment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(d.id)
        .bind(&d.title)
        .bind(&d.location)
        .bind(d.salary)
        .bind(&d.summary)
        .bind(&d.responsibilities)
        .bind(&d.requirements)
        .bind(d.employment.as_str())
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO job_offer
                (id, version, company, publication_date, expiration_date, views_count, status, job_description_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(offer.id)
        .bind(offer.version)
        .bind(&offer.company)
        .bind(offer.publication_date)
        .bind(offer.expiration_date)
        .bind(offer.views_count)
        .bind(offer.status.as_str())
        .bind(d.id)
        .execute(&mut *tx)
        .await?;

        for (idx, application) in offer.applications.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO application
                    (id, job_offer_id, idx, applicant, resume, cover_letter, application_date, documents, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(application.id)
            .bind(offer.id)
            .bind(i32::try_from(idx).unwrap_or(i32::MAX))
            .bind(&application.applicant)
            .bind(application.resume.as_str())
            .bind(application.cover_letter.as_ref().map(|uri| uri.as_str()))
            .bind(application.date)
            .bind(
                application
                    .documents
                    .iter()
                    .map(|uri| uri.to_string())
                    .collect::<Vec<_>>(),
            )
            .bind(application.status.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(applications = offer.applications.len(), "job offer inserted");
        Ok(())
    }

    #[instrument(skip(self, offer), fields(id = %offer.id))]
    async fn update_if_version(
        &self,
        offer: &JobOffer,
        expected_version: i32,
    ) -> Result<UpdateOutcome> {
        let views_count: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE job_offer
            SET company = $3,
                publication_date = $4,
                expiration_date = $5,
                views_count = GREATEST(views_count, $6),
                status = $7,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING views_count
            "#,
        )
        .bind(offer.id)
        .bind(expected_version)
        .bind(&offer.company)
        .bind(offer.publication_date)
        .bind(offer.expiration_date)
        .bind(offer.views_count)
        .bind(offer.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(views_count) = views_count else {
            return Ok(UpdateOutcome::Stale);
        };
        Ok(UpdateOutcome::Updated(JobOffer {
            version: expected_version + 1,
            views_count,
            ..offer.clone()
        }))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: JobOfferId) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM application WHERE job_offer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let description_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM job_offer WHERE id = $1 RETURNING job_description_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if let Some(description_id) = description_id {
            sqlx::query("DELETE FROM job_description WHERE id = $1")
                .bind(description_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(description_id.is_some())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Row Types
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
struct JobOfferRow {
    id: Uuid,
    version: i32,
    company: String,
    publication_date: Option<NaiveDate>,
    expiration_date: NaiveDate,
    views_count: i32,
    status: String,
    description_id: Uuid,
    title: String,
    location: String,
    salary: Decimal,
    summary: String,
    responsibilities: String,
    requirements: String,
    employment: String,
}

impl TryFrom<JobOfferRow> for JobOffer {
    type Error = JobConnectError;

    fn try_from(row: JobOfferRow) -> Result<Self> {
        Ok(JobOffer {
            id: row.id,
            version: row.version,
            company: row.company,
            publication_date: row.publication_date,
            expiration_date: row.expiration_date,
            views_count: row.views_count,
            status: row.status.parse().map_err(corrupt_row)?,
            description: JobDescription {
                id: row.description_id,
                title: row.title,
                location: row.location,
                salary: row.salary,
                summary: row.summary,
                responsibilities: row.responsibilities,
                requirements: row.requirements,
                employment: row.employment.parse().map_err(corrupt_row)?,
            },
            applications: Vec::new(),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    applicant: String,
    resume: String,
    cover_letter: Option<String>,
    application_date: NaiveDate,
    documents: Vec<String>,
    status: String,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = JobConnectError;

    fn try_from(row: ApplicationRow) -> Result<Self> {
        Ok(Application {
            id: row.id,
            applicant: row.applicant,
            resume: row.resume.parse().map_err(corrupt_row)?,
            cover_letter: row
                .cover_letter
                .map(|uri| uri.parse::<Url>())
                .transpose()
                .map_err(corrupt_row)?,
            date: row.application_date,
            documents: row
                .documents
                .iter()
                .map(|uri| uri.parse::<Url>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(corrupt_row)?,
            status: row.status.parse().map_err(corrupt_row)?,
        })
    }
}

fn corrupt_row<E: std::error::Error + Send + Sync + 'static>(error: E) -> JobConnectError {
    JobConnectError::with_internal(
        crate::error::ErrorCode::DatabaseError,
        "A database error occurred",
        format!("unreadable row: {}", error),
    )
    .with_source(error)
}
