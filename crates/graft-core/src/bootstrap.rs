//! Source container bootstrapper

use crate::error::BootstrapError;
use crate::runtime::SourceRuntime;
use graft_model::{NamespaceInventory, RESERVED_XML_NAMESPACES};
use graft_namespace::{NamespaceHandlerSet, Resource};
use graft_translate::SourceContainer;
use indexmap::IndexSet;

/// A fully initialized container and its component enumeration
pub struct Bootstrapped {
    /// Container handle
    pub container: Box<dyn SourceContainer>,

    /// Component identifiers in container order
    pub component_ids: IndexSet<String>,
}

impl std::fmt::Debug for Bootstrapped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrapped")
            .field("component_ids", &self.component_ids)
            .finish_non_exhaustive()
    }
}

/// Builds source containers after checking every namespace is handled
#[derive(Debug)]
pub struct Bootstrapper<R> {
    runtime: R,
}

impl<R: SourceRuntime> Bootstrapper<R> {
    /// Create bootstrapper over a runtime
    #[inline]
    #[must_use]
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// Namespaces in `inventory` that neither the runtime, XML itself nor
    /// `handlers` can serve
    #[must_use]
    pub fn unresolved(
        &self,
        inventory: &NamespaceInventory,
        handlers: &NamespaceHandlerSet,
    ) -> Vec<String> {
        let builtin = self.runtime.builtin_namespaces();
        inventory
            .iter()
            .filter(|ns| {
                !builtin.contains(ns)
                    && !RESERVED_XML_NAMESPACES.contains(ns)
                    && !handlers.contains(ns)
            })
            .map(str::to_string)
            .collect()
    }

    /// Validate namespaces, then build the container
    ///
    /// # Errors
    /// Returns [`BootstrapError::UnresolvedNamespace`] before anything is
    /// built, or the runtime's construction error
    pub fn bootstrap(
        &self,
        documents: &[Resource],
        inventory: &NamespaceInventory,
        handlers: &NamespaceHandlerSet,
    ) -> Result<Bootstrapped, BootstrapError> {
        let namespaces = self.unresolved(inventory, handlers);
        if !namespaces.is_empty() {
            return Err(BootstrapError::UnresolvedNamespace { namespaces });
        }

        let container = self.runtime.create_container(documents, handlers)?;
        let component_ids = container.component_ids();
        tracing::info!(
            "Bootstrapped container from {} document(s) with {} component(s)",
            documents.len(),
            component_ids.len()
        );

        Ok(Bootstrapped {
            container,
            component_ids,
        })
    }
}
