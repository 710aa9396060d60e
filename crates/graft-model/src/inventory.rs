//! Namespace inventory
//!
//! The set of namespace URIs bound anywhere in a batch of declarative
//! documents. Used to offer namespaces to extensions that do not declare
//! their own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of namespace URIs observed while scanning documents
///
/// Ordered so that extension resolution and log output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceInventory {
    namespaces: BTreeSet<String>,
}

impl NamespaceInventory {
    /// Create empty inventory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a namespace URI, returning `true` if it was not seen before
    pub fn insert(&mut self, namespace: impl Into<String>) -> bool {
        self.namespaces.insert(namespace.into())
    }

    /// Check if namespace was observed
    #[inline]
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains(namespace)
    }

    /// Number of distinct namespaces
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Check if no namespace was observed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Iterate namespaces in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    /// Merge another inventory into this one
    pub fn extend(&mut self, other: NamespaceInventory) {
        self.namespaces.extend(other.namespaces);
    }
}

impl FromIterator<String> for NamespaceInventory {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            namespaces: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for NamespaceInventory {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}
