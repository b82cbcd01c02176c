//! Search and filter parameters attached to list requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Active search/filter parameters for a list.
///
/// A key mapped to `None`, an empty string or whitespace is "not applied".
/// [`FilterCriteria::effective`] yields the subset that is actually sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria(BTreeMap<String, Option<String>>);

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a filter value.
    pub fn with<V>(mut self, key: impl Into<String>, value: V) -> Self
    where
        V: Into<Option<String>>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<V>(&mut self, key: impl Into<String>, value: V)
    where
        V: Into<Option<String>>,
    {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.as_deref())
    }

    /// Returns only the entries carrying a non-blank value, trimmed.
    pub fn effective(&self) -> FilterCriteria {
        let applied = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (key.clone(), Some(v.to_string())))
            })
            .collect();
        FilterCriteria(applied)
    }

    /// True when no entry would constrain the list.
    pub fn is_unconstrained(&self) -> bool {
        self.applied().next().is_none()
    }

    /// Iterates over applied `(key, value)` pairs.
    pub fn applied(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key.as_str(), v))
        })
    }
}

impl<K, V> FromIterator<(K, V)> for FilterCriteria
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = FilterCriteria::new();
        for (key, value) in iter {
            criteria.insert(key, value);
        }
        criteria
    }
}
