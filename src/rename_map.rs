use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::RenameError;

/// Suffix of framework change observers (`fooChanged` observes `foo`).
pub const CHANGED_SUFFIX: &str = "Changed";

/// Mapping from original symbol to renamed symbol.
///
/// Built once and never mutated afterwards; lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenameMap {
    entries: HashMap<String, String>,
}

impl RenameMap {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Parse a map from a JSON object of `{"original": "renamed"}` pairs.
    pub fn from_json(json: &str) -> Result<Self, RenameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Exact lookup.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.entries.get(symbol).map(String::as_str)
    }

    /// Resolve a property name, following the change-observer naming convention.
    ///
    /// `longNameChanged` resolves through `longName` when only the latter is mapped.
    pub fn resolve<'m>(&'m self, symbol: &str) -> Option<Cow<'m, str>> {
        if let Some(renamed) = self.get(symbol) {
            return Some(Cow::Borrowed(renamed));
        }

        let observed = symbol.strip_suffix(CHANGED_SUFFIX)?;
        if observed.is_empty() {
            return None;
        }
        self.get(observed)
            .map(|renamed| Cow::Owned(format!("{}{}", renamed, CHANGED_SUFFIX)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, String>> for RenameMap {
    fn from(entries: HashMap<String, String>) -> Self {
        Self::new(entries)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenameMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
