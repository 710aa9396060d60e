//! Source runtime capability
//!
//! The runtime owns the actual container implementation. Graft only tells
//! it which documents to load and which namespace handlers to use.

use crate::error::BootstrapError;
use graft_model::NamespaceInventory;
use graft_namespace::{NamespaceHandlerSet, Resource};
use graft_translate::SourceContainer;

/// Factory for source containers
pub trait SourceRuntime {
    /// Namespaces the runtime handles without any extension
    fn builtin_namespaces(&self) -> NamespaceInventory;

    /// Build and fully initialize a container from `documents`
    ///
    /// # Errors
    /// Returns error if any document cannot be turned into a container
    fn create_container(
        &self,
        documents: &[Resource],
        handlers: &NamespaceHandlerSet,
    ) -> Result<Box<dyn SourceContainer>, BootstrapError>;
}

impl<R: SourceRuntime + ?Sized> SourceRuntime for &R {
    fn builtin_namespaces(&self) -> NamespaceInventory {
        (**self).builtin_namespaces()
    }

    fn create_container(
        &self,
        documents: &[Resource],
        handlers: &NamespaceHandlerSet,
    ) -> Result<Box<dyn SourceContainer>, BootstrapError> {
        (**self).create_container(documents, handlers)
    }
}
