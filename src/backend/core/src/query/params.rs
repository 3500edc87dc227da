//! Raw, multi-valued search parameters as received from a query string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to the list of values supplied for it.
///
/// Values are kept as received; interpretation is left to the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchParams(BTreeMap<String, Vec<String>>);

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect `(field, value)` pairs, appending repeated fields.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (field, value) in pairs {
            params.push(field, value);
        }
        params
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(value.into());
    }

    /// Remove a field, returning its values.
    pub fn remove(&mut self, field: &str) -> Option<Vec<String>> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields in lexical order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_fields_accumulate() {
        let params = SearchParams::from_pairs([("status", "ACTIVE"), ("status", "CLOSED"), ("company", "acme")]);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("status").unwrap(), ["ACTIVE", "CLOSED"]);
    }

    #[test]
    fn test_remove_strips_field() {
        let mut params: SearchParams = [("page", "2"), ("company", "acme")].into_iter().collect();

        assert_eq!(params.remove("page"), Some(vec!["2".to_string()]));
        assert!(params.get("page").is_none());
        assert!(!params.is_empty());
    }

    #[test]
    fn test_serializes_as_map_of_lists() {
        let params = SearchParams::from_pairs([("minViews", "5")]);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["minViews"][0], "5");
    }
}
