//! Namespace lookup table
//!
//! Result of extension loading: which handler and schema serve each
//! namespace URI, plus one descriptor per loaded extension.

use crate::handler::NamespaceHandler;
use graft_model::{ExtensionDescriptor, SchemaLocation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What happens when two extensions resolve the same namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceConflict {
    /// Later registrations overwrite earlier ones
    #[default]
    LastRegisteredWins,

    /// The first registration is kept
    FirstRegisteredWins,
}

/// One namespace bound to the extension serving it
#[derive(Debug, Clone)]
pub struct NamespaceBinding {
    /// Schema validating the namespace
    pub schema: SchemaLocation,

    /// Identifier of the serving extension
    pub extension_id: String,

    /// The serving extension
    pub handler: Arc<dyn NamespaceHandler>,
}

/// Lookup table keyed by namespace URI
#[derive(Debug, Clone, Default)]
pub struct NamespaceHandlerSet {
    bindings: IndexMap<String, NamespaceBinding>,
    descriptors: Vec<ExtensionDescriptor>,
    conflict: NamespaceConflict,
}

impl NamespaceHandlerSet {
    /// Create empty set with the default conflict policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty set with an explicit conflict policy
    #[inline]
    #[must_use]
    pub fn with_conflict(conflict: NamespaceConflict) -> Self {
        Self {
            conflict,
            ..Self::default()
        }
    }

    /// Bind `namespace` to an extension
    ///
    /// Returns `true` if the binding is in effect afterwards.
    pub fn add_namespace(
        &mut self,
        namespace: &str,
        schema: SchemaLocation,
        extension_id: &str,
        handler: Arc<dyn NamespaceHandler>,
    ) -> bool {
        if let Some(existing) = self.bindings.get(namespace) {
            tracing::debug!(
                "Namespace {} resolved by both '{}' and '{}' ({:?})",
                namespace,
                existing.extension_id,
                extension_id,
                self.conflict
            );
            if self.conflict == NamespaceConflict::FirstRegisteredWins {
                return false;
            }
        }

        tracing::info!("namespace: {} {} {}", namespace, schema, extension_id);
        self.bindings.insert(
            namespace.to_string(),
            NamespaceBinding {
                schema,
                extension_id: extension_id.to_string(),
                handler,
            },
        );
        true
    }

    /// Record the descriptor of a loaded extension
    pub fn push_descriptor(&mut self, descriptor: ExtensionDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Binding for a namespace
    #[inline]
    #[must_use]
    pub fn get(&self, namespace: &str) -> Option<&NamespaceBinding> {
        self.bindings.get(namespace)
    }

    /// Handler serving a namespace
    #[must_use]
    pub fn handler(&self, namespace: &str) -> Option<&Arc<dyn NamespaceHandler>> {
        self.bindings.get(namespace).map(|b| &b.handler)
    }

    /// Schema for a namespace
    #[must_use]
    pub fn schema(&self, namespace: &str) -> Option<&SchemaLocation> {
        self.bindings.get(namespace).map(|b| &b.schema)
    }

    /// Check if namespace is bound
    #[inline]
    #[must_use]
    pub fn contains(&self, namespace: &str) -> bool {
        self.bindings.contains_key(namespace)
    }

    /// Bound namespaces in first-binding order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// All bindings
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamespaceBinding)> {
        self.bindings.iter().map(|(ns, b)| (ns.as_str(), b))
    }

    /// Descriptors of all loaded extensions in load order
    #[inline]
    #[must_use]
    pub fn descriptors(&self) -> &[ExtensionDescriptor] {
        &self.descriptors
    }

    /// Active conflict policy
    #[inline]
    #[must_use]
    pub fn conflict(&self) -> NamespaceConflict {
        self.conflict
    }

    /// Number of bound namespaces
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if nothing is bound
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
