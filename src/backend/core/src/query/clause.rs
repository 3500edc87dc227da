//! Filter clauses for the search fields job offers can be queried by.
//!
//! Each clause turns one raw value into a [`Predicate`], or rejects it with
//! `None`. The set of fields is closed: anything not listed in [`CLAUSES`]
//! is unknown.

use uuid::Uuid;

use super::Predicate;

/// Converts a raw value into a predicate, `None` when the value is rejected.
pub type ClauseFn = fn(&str) -> Option<Predicate>;

/// Every searchable field with its clause. `firma` is a legacy alias of `company`.
pub const CLAUSES: &[(&str, ClauseFn)] = &[
    ("id", id),
    ("company", company),
    ("firma", company),
    ("status", status),
    ("minViews", min_views),
];

/// Find the clause for a field name. Field names are case-sensitive.
pub fn lookup(field: &str) -> Option<ClauseFn> {
    CLAUSES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, clause)| *clause)
}

/// Apply the clause registered for `field`, `None` for unknown fields or
/// rejected values.
pub fn clause(field: &str, value: &str) -> Option<Predicate> {
    lookup(field).and_then(|clause| clause(value))
}

fn id(value: &str) -> Option<Predicate> {
    Uuid::parse_str(value).ok().map(Predicate::IdIs)
}

fn company(value: &str) -> Option<Predicate> {
    Some(Predicate::CompanyContains(value.to_string()))
}

fn status(value: &str) -> Option<Predicate> {
    value.parse().ok().map(Predicate::StatusIs)
}

fn min_views(value: &str) -> Option<Predicate> {
    value.parse().ok().map(Predicate::MinViews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobOfferStatus;

    #[test]
    fn test_company_and_alias() {
        assert_eq!(
            clause("company", "Acme"),
            Some(Predicate::CompanyContains("Acme".into()))
        );
        assert_eq!(clause("firma", "Acme"), clause("company", "Acme"));
    }

    #[test]
    fn test_status() {
        assert_eq!(
            clause("status", "INACTIVE"),
            Some(Predicate::StatusIs(JobOfferStatus::Inactive))
        );
        assert_eq!(clause("status", "bogus"), None);
    }

    #[test]
    fn test_min_views() {
        assert_eq!(clause("minViews", "0"), Some(Predicate::MinViews(0)));
        assert_eq!(clause("minViews", "abc"), None);
        assert_eq!(clause("minViews", "99999999999"), None);
    }

    #[test]
    fn test_id() {
        let id = Uuid::new_v4();
        assert_eq!(clause("id", &id.to_string()), Some(Predicate::IdIs(id)));
        assert_eq!(clause("id", "not-a-uuid"), None);
    }

    #[test]
    fn test_unknown_field() {
        assert!(lookup("salary").is_none());
        assert!(lookup("Company").is_none());
        assert_eq!(clause("salary", "1000"), None);
    }
}
