//! Source container capability
//!
//! The translator reads a live, fully bootstrapped component graph through
//! these traits. The container itself belongs to an external runtime.

use graft_model::ComponentMetadata;
use indexmap::IndexSet;
use std::sync::Arc;

/// A live component instance
pub trait ComponentInstance: Send + Sync + std::fmt::Debug {
    /// Fully qualified name of the instance's concrete runtime type
    fn type_name(&self) -> &str;
}

/// Read and dispose access to a bootstrapped source container
pub trait SourceContainer {
    /// Identifiers of every managed component, in container order
    fn component_ids(&self) -> IndexSet<String>;

    /// Live instance of a component
    fn instance(&self, component_id: &str) -> Option<Arc<dyn ComponentInstance>>;

    /// Structural metadata of a component
    fn metadata(&self, component_id: &str) -> Option<ComponentMetadata>;

    /// Terminate every managed instance
    fn dispose(&mut self);
}

impl<C: SourceContainer + ?Sized> SourceContainer for Box<C> {
    fn component_ids(&self) -> IndexSet<String> {
        (**self).component_ids()
    }

    fn instance(&self, component_id: &str) -> Option<Arc<dyn ComponentInstance>> {
        (**self).instance(component_id)
    }

    fn metadata(&self, component_id: &str) -> Option<ComponentMetadata> {
        (**self).metadata(component_id)
    }

    fn dispose(&mut self) {
        (**self).dispose();
    }
}
