//! Compiles raw search parameters into a single [`Predicate`].
//!
//! Compilation is all-or-nothing: a single unknown field, repeated field or
//! rejected value fails the whole set.

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::{clause, Predicate, SearchParams};

/// Why a set of search parameters could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unknown search field `{0}`")]
    UnknownField(String),

    #[error("search field `{field}` expects exactly one value, got {count}")]
    ValueCount { field: String, count: usize },

    #[error("invalid value `{value}` for search field `{field}`")]
    InvalidValue { field: String, value: String },
}

impl CompileError {
    /// The search field the failure refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField(field) => field,
            Self::ValueCount { field, .. } | Self::InvalidValue { field, .. } => field,
        }
    }
}

/// Compile `params` into a predicate.
///
/// Returns `Ok(None)` when there is nothing to filter on. Accepted clauses are
/// combined with AND.
pub fn compile(params: &SearchParams) -> Result<Option<Predicate>, CompileError> {
    debug!(?params, "compile");
    if params.is_empty() {
        return Ok(None);
    }

    let mut predicates = Vec::with_capacity(params.len());
    for (field, values) in params.iter() {
        let predicate = compile_field(field, values).inspect_err(|e| {
            warn!(field, error = %e, "rejected search parameter");
        })?;
        trace!(field, ?predicate, "compiled clause");
        predicates.push(predicate);
    }

    let predicate = if predicates.len() == 1 {
        predicates.remove(0)
    } else {
        Predicate::All(predicates)
    };
    Ok(Some(predicate))
}

fn compile_field(field: &str, values: &[String]) -> Result<Predicate, CompileError> {
    let clause = clause::lookup(field).ok_or_else(|| CompileError::UnknownField(field.to_string()))?;

    let [value] = values else {
        return Err(CompileError::ValueCount {
            field: field.to_string(),
            count: values.len(),
        });
    };

    clause(value).ok_or_else(|| CompileError::InvalidValue {
        field: field.to_string(),
        value: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobOfferStatus;

    #[test]
    fn test_empty_params_mean_no_filter() {
        assert_eq!(compile(&SearchParams::new()), Ok(None));
    }

    #[test]
    fn test_single_clause_is_not_wrapped() {
        let params = SearchParams::from_pairs([("minViews", "5")]);
        assert_eq!(compile(&params), Ok(Some(Predicate::MinViews(5))));
    }

    #[test]
    fn test_clauses_are_conjoined() {
        let params = SearchParams::from_pairs([("status", "ACTIVE"), ("company", "acm")]);
        assert_eq!(
            compile(&params),
            Ok(Some(Predicate::All(vec![
                Predicate::CompanyContains("acm".into()),
                Predicate::StatusIs(JobOfferStatus::Active),
            ])))
        );
    }

    #[test]
    fn test_unknown_field_fails() {
        let params = SearchParams::from_pairs([("company", "acme"), ("salary", "100")]);
        assert_eq!(
            compile(&params),
            Err(CompileError::UnknownField("salary".into()))
        );
    }

    #[test]
    fn test_repeated_field_fails() {
        let params = SearchParams::from_pairs([("status", "ACTIVE"), ("status", "CLOSED")]);
        let error = compile(&params).unwrap_err();
        assert_eq!(
            error,
            CompileError::ValueCount {
                field: "status".into(),
                count: 2
            }
        );
        assert_eq!(error.field(), "status");
    }

    #[test]
    fn test_invalid_value_fails_whole_set() {
        let params = SearchParams::from_pairs([("company", "acme"), ("minViews", "abc")]);
        assert_eq!(
            compile(&params),
            Err(CompileError::InvalidValue {
                field: "minViews".into(),
                value: "abc".into()
            })
        );
    }
}
