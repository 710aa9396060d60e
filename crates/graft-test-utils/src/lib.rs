//! Testing utilities for graft workspace
//!
//! In-memory source containers and runtimes, plus document and manifest
//! fixtures.

#![allow(missing_docs)]

use graft_core::{BootstrapError, SourceRuntime};
use graft_model::{
    BeanArgument, BeanMetadata, BeanProperty, ComponentMetadata, MetadataValue,
    NamespaceInventory, BLUEPRINT_CORE_NAMESPACE, UNTYPED_PLACEHOLDER,
};
use graft_namespace::{Manifest, NamespaceHandlerSet, Resource};
use graft_translate::{ComponentInstance, SourceContainer};
use indexmap::{IndexMap, IndexSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CM_NAMESPACE: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0";
pub const EXT_NAMESPACE: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-ext/v1.2.0";

#[derive(Debug, Clone)]
pub struct StaticInstance {
    type_name: String,
}

impl StaticInstance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl ComponentInstance for StaticInstance {
    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Container over a fixed component table that counts disposals
#[derive(Debug, Clone, Default)]
pub struct StaticContainer {
    components: IndexMap<String, (Option<Arc<dyn ComponentInstance>>, Option<ComponentMetadata>)>,
    disposals: Arc<AtomicUsize>,
}

impl StaticContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(
        mut self,
        id: &str,
        type_name: &str,
        metadata: impl Into<ComponentMetadata>,
    ) -> Self {
        let instance: Arc<dyn ComponentInstance> = Arc::new(StaticInstance::new(type_name));
        self.components
            .insert(id.to_string(), (Some(instance), Some(metadata.into())));
        self
    }

    /// Component with metadata but no live instance
    pub fn with_missing_instance(
        mut self,
        id: &str,
        metadata: impl Into<ComponentMetadata>,
    ) -> Self {
        self.components
            .insert(id.to_string(), (None, Some(metadata.into())));
        self
    }

    /// Shared disposal counter, still readable after the container is dropped
    pub fn disposals(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.disposals)
    }
}

impl SourceContainer for StaticContainer {
    fn component_ids(&self) -> IndexSet<String> {
        self.components.keys().cloned().collect()
    }

    fn instance(&self, component_id: &str) -> Option<Arc<dyn ComponentInstance>> {
        self.components
            .get(component_id)
            .and_then(|(instance, _)| instance.clone())
    }

    fn metadata(&self, component_id: &str) -> Option<ComponentMetadata> {
        self.components
            .get(component_id)
            .and_then(|(_, metadata)| metadata.clone())
    }

    fn dispose(&mut self) {
        self.disposals.fetch_add(1, Ordering::SeqCst);
    }
}

/// Runtime handing out clones of a template container
#[derive(Debug, Default)]
pub struct StaticRuntime {
    builtin: NamespaceInventory,
    template: StaticContainer,
    failure: Option<String>,
    seen_documents: Mutex<Vec<String>>,
}

impl StaticRuntime {
    /// Runtime that knows the blueprint core namespace
    pub fn new(template: StaticContainer) -> Self {
        Self {
            builtin: [BLUEPRINT_CORE_NAMESPACE].into_iter().collect(),
            template,
            failure: None,
            seen_documents: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(StaticContainer::new())
        }
    }

    pub fn disposals(&self) -> Arc<AtomicUsize> {
        self.template.disposals()
    }

    /// Locations of the documents passed to the last construction
    pub fn seen_documents(&self) -> Vec<String> {
        self.seen_documents.lock().unwrap().clone()
    }
}

impl SourceRuntime for StaticRuntime {
    fn builtin_namespaces(&self) -> NamespaceInventory {
        self.builtin.clone()
    }

    fn create_container(
        &self,
        documents: &[Resource],
        _handlers: &NamespaceHandlerSet,
    ) -> Result<Box<dyn SourceContainer>, BootstrapError> {
        *self.seen_documents.lock().unwrap() =
            documents.iter().map(|d| d.location().to_string()).collect();
        match &self.failure {
            Some(message) => Err(BootstrapError::runtime(message.clone())),
            None => Ok(Box::new(self.template.clone())),
        }
    }
}

pub fn blueprint_document(extra_namespaces: &[(&str, &str)]) -> Resource {
    let bindings: String = extra_namespaces
        .iter()
        .map(|(prefix, ns)| format!(" xmlns:{prefix}=\"{ns}\""))
        .collect();
    Resource::from_bytes(
        "OSGI-INF/blueprint/blueprint.xml",
        format!(
            "<blueprint xmlns=\"{BLUEPRINT_CORE_NAMESPACE}\"{bindings}>\n\
             \x20 <bean id=\"a\" class=\"com.acme.A\"/>\n\
             </blueprint>\n"
        ),
    )
}

pub fn manifest(ids: &[&str]) -> Manifest {
    Manifest::parse_str("META-INF/blueprint.handlers", &ids.join("\n")).unwrap()
}

/// `a` with no arguments, `b` taking `a` through a placeholder-typed constructor reference
pub fn two_bean_container() -> StaticContainer {
    StaticContainer::new()
        .with_component("a", "com.acme.A", BeanMetadata::new().with_class("com.acme.A"))
        .with_component(
            "b",
            "com.acme.B",
            BeanMetadata::new()
                .with_class("com.acme.B")
                .with_argument(BeanArgument::reference("a", Some(UNTYPED_PLACEHOLDER))),
        )
}

/// One bean with literal property `name="x"` and init method `start`
pub fn greeter_container() -> StaticContainer {
    StaticContainer::new().with_component(
        "greeter",
        "com.acme.Greeter",
        BeanMetadata::new()
            .with_class("com.acme.Greeter")
            .with_property(BeanProperty::new("name", MetadataValue::literal("x", None)))
            .with_init_method("start"),
    )
}
