//! Extension registry
//!
//! Maps the stable identifiers used in manifests to factories producing
//! [`NamespaceHandler`]s. Extensions are registered explicitly at start-up;
//! a manifest can only name what was registered here.

use crate::error::ExtensionError;
use crate::handler::{FamilyAliasHandler, NamespaceHandler, SchemaTableHandler};
use graft_model::SchemaLocation;
use indexmap::IndexMap;
use std::sync::Arc;

/// Factory producing a fresh handler instance
pub type ExtensionFactory =
    Box<dyn Fn() -> Result<Arc<dyn NamespaceHandler>, ExtensionError> + Send + Sync>;

/// Identifier of the built-in `blueprint-ext` schema table
pub const EXT_EXTENSION_ID: &str = "ext";

/// Identifier of the built-in `blueprint-cm` aliasing handler
pub const CM_EXTENSION_ID: &str = "cm";

const EXT_NAMESPACE_BASE: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-ext";
const EXT_SCHEMA_BASE: &str = "classpath:/org/apache/aries/blueprint/ext/impl";
const EXT_VERSIONS: &[(&str, &str)] = &[
    ("v1.0.0", "blueprint-ext.xsd"),
    ("v1.1.0", "blueprint-ext-1.1.xsd"),
    ("v1.2.0", "blueprint-ext-1.2.xsd"),
    ("v1.3.0", "blueprint-ext-1.3.xsd"),
    ("v1.4.0", "blueprint-ext-1.4.xsd"),
    ("v1.5.0", "blueprint-ext-1.5.xsd"),
];

/// Registry of extension factories keyed by identifier
pub struct ExtensionRegistry {
    factories: IndexMap<String, ExtensionFactory>,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &self.names())
            .finish()
    }
}

impl ExtensionRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Create registry with the built-in `ext` and `cm` extensions
    ///
    /// # Errors
    /// Returns error if a built-in schema location fails to parse
    pub fn with_defaults() -> Result<Self, ExtensionError> {
        let ext = ext_schema_table()?;
        let mut registry = Self::new();
        registry.register_handler(EXT_EXTENSION_ID, ext.clone().declaring());
        registry.register_handler(
            CM_EXTENSION_ID,
            FamilyAliasHandler::new(ext, "blueprint-cm/v", "blueprint-ext/v"),
        );
        Ok(registry)
    }

    /// Register a factory, replacing any previous one with the same identifier
    pub fn register<F>(&mut self, extension_id: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<Arc<dyn NamespaceHandler>, ExtensionError> + Send + Sync + 'static,
    {
        self.factories.insert(extension_id.into(), Box::new(factory));
    }

    /// Register a cloneable handler; every creation yields a fresh clone
    pub fn register_handler<H>(&mut self, extension_id: impl Into<String>, handler: H)
    where
        H: NamespaceHandler + Clone + 'static,
    {
        self.register(extension_id, move || {
            Ok(Arc::new(handler.clone()) as Arc<dyn NamespaceHandler>)
        });
    }

    /// Create the extension registered under `extension_id`
    ///
    /// # Errors
    /// Returns error if nothing is registered under the identifier or the
    /// factory fails
    pub fn create(&self, extension_id: &str) -> Result<Arc<dyn NamespaceHandler>, ExtensionError> {
        let factory = self
            .factories
            .get(extension_id)
            .ok_or_else(|| ExtensionError::UnknownExtension(extension_id.to_string()))?;
        factory()
    }

    /// Check if identifier is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, extension_id: &str) -> bool {
        self.factories.contains_key(extension_id)
    }

    /// Registered identifiers in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Number of registered extensions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Schema table for every known `blueprint-ext` namespace version
///
/// # Errors
/// Returns error if a schema location fails to parse
pub fn ext_schema_table() -> Result<SchemaTableHandler, ExtensionError> {
    EXT_VERSIONS
        .iter()
        .try_fold(SchemaTableHandler::new(), |table, (version, file)| {
            let schema =
                SchemaLocation::parse(&format!("{EXT_SCHEMA_BASE}/{file}")).map_err(|e| {
                    ExtensionError::instantiation_failed(EXT_EXTENSION_ID, e.to_string())
                })?;
            Ok(table.with_schema(format!("{EXT_NAMESPACE_BASE}/{version}"), schema))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CM_V1_1: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0";
    const EXT_V1_1: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-ext/v1.1.0";

    #[test]
    fn registry_new_empty() {
        let registry = ExtensionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_with_defaults() {
        let registry = ExtensionRegistry::with_defaults().unwrap();
        assert_eq!(registry.names(), vec![EXT_EXTENSION_ID, CM_EXTENSION_ID]);

        let ext = registry.create(EXT_EXTENSION_ID).unwrap();
        assert_eq!(ext.declared_namespaces().map(|n| n.len()), Some(6));

        let cm = registry.create(CM_EXTENSION_ID).unwrap();
        assert!(cm.declared_namespaces().is_none());
        assert_eq!(cm.schema_location(CM_V1_1), ext.schema_location(EXT_V1_1));
        assert_eq!(
            cm.schema_location(CM_V1_1).map(|s| s.to_string()),
            Some("classpath:/org/apache/aries/blueprint/ext/impl/blueprint-ext-1.1.xsd".to_string())
        );
    }

    #[test]
    fn create_unknown_extension() {
        let registry = ExtensionRegistry::new();
        let err = registry.create("missing").unwrap_err();
        assert!(matches!(err, ExtensionError::UnknownExtension(ref id) if id == "missing"));
    }

    #[test]
    fn failing_factory_propagates() {
        let mut registry = ExtensionRegistry::new();
        registry.register("broken", || {
            Err(ExtensionError::instantiation_failed("broken", "no default constructor"))
        });
        assert!(matches!(
            registry.create("broken"),
            Err(ExtensionError::InstantiationFailed { .. })
        ));
    }

    #[test]
    fn register_replaces_same_identifier() {
        let mut registry = ExtensionRegistry::new();
        registry.register_handler("x", SchemaTableHandler::new());
        registry.register_handler("x", SchemaTableHandler::new().declaring());
        assert_eq!(registry.len(), 1);
        assert!(registry.create("x").unwrap().declared_namespaces().is_some());
    }

    #[test]
    fn registry_debug() {
        let registry = ExtensionRegistry::with_defaults().unwrap();
        let debug_str = format!("{registry:?}");
        assert!(debug_str.contains("ExtensionRegistry"));
        assert!(debug_str.contains("cm"));
    }
}
