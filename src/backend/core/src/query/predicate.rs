//! Typed filter over job offers.
//!
//! A [`Predicate`] is evaluated directly against in-memory records or
//! rendered into a Postgres `WHERE` fragment with bound parameters. Rendered
//! SQL refers to the job offer table through the alias `o`.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::{JobOffer, JobOfferId, JobOfferStatus};

/// A filter on job offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Company name contains the text, ignoring case.
    CompanyContains(String),
    /// Status equals the given value.
    StatusIs(JobOfferStatus),
    /// View count is at least the given bound.
    MinViews(i32),
    /// Identifier equals the given id.
    IdIs(JobOfferId),
    /// Every inner predicate holds. An empty conjunction matches everything.
    All(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate against a single record.
    pub fn matches(&self, offer: &JobOffer) -> bool {
        match self {
            Self::CompanyContains(needle) => offer
                .company
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::StatusIs(status) => offer.status == *status,
            Self::MinViews(min) => offer.views_count >= *min,
            Self::IdIs(id) => offer.id == *id,
            Self::All(predicates) => predicates.iter().all(|p| p.matches(offer)),
        }
    }

    /// Append this predicate as a boolean SQL expression.
    pub fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::CompanyContains(needle) => {
                qb.push("lower(o.company) LIKE lower(")
                    .push_bind(format!("%{}%", escape_like(needle)))
                    .push(") ESCAPE '\\'");
            }
            Self::StatusIs(status) => {
                qb.push("o.status = ").push_bind(status.as_str());
            }
            Self::MinViews(min) => {
                qb.push("o.views_count >= ").push_bind(*min);
            }
            Self::IdIs(id) => {
                qb.push("o.id = ").push_bind(*id);
            }
            Self::All(predicates) if predicates.is_empty() => {
                qb.push("TRUE");
            }
            Self::All(predicates) => {
                qb.push("(");
                for (i, predicate) in predicates.iter().enumerate() {
                    if i > 0 {
                        qb.push(" AND ");
                    }
                    predicate.push_sql(qb);
                }
                qb.push(")");
            }
        }
    }
}

/// Escape `LIKE` metacharacters so the text matches literally under `ESCAPE '\'`.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
