//! Namespace handlers
//!
//! A handler recognizes namespace URIs and supplies the schema that
//! validates documents using them. Implement [`NamespaceHandler`] to add
//! support for a new vocabulary.

use graft_model::SchemaLocation;
use indexmap::IndexMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Extension capability consumed by the loader and the source runtime
pub trait NamespaceHandler: Send + Sync + Debug {
    /// Schema location for `namespace`, or `None` if not handled
    fn schema_location(&self, namespace: &str) -> Option<SchemaLocation>;

    /// Namespaces this handler declares statically
    ///
    /// `None` means "unknown": the loader offers every namespace found in
    /// the documents and keeps those this handler resolves.
    fn declared_namespaces(&self) -> Option<Vec<String>> {
        None
    }
}

impl<H: NamespaceHandler + ?Sized> NamespaceHandler for Arc<H> {
    fn schema_location(&self, namespace: &str) -> Option<SchemaLocation> {
        (**self).schema_location(namespace)
    }

    fn declared_namespaces(&self) -> Option<Vec<String>> {
        (**self).declared_namespaces()
    }
}

/// Handler backed by a fixed namespace → schema table
#[derive(Debug, Clone, Default)]
pub struct SchemaTableHandler {
    schemas: IndexMap<String, SchemaLocation>,
    declares: bool,
}

impl SchemaTableHandler {
    /// Create empty table that does not declare its namespaces
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add table entry
    #[must_use]
    pub fn with_schema(mut self, namespace: impl Into<String>, schema: SchemaLocation) -> Self {
        self.schemas.insert(namespace.into(), schema);
        self
    }

    /// Declare the table's namespaces statically
    #[inline]
    #[must_use]
    pub fn declaring(mut self) -> Self {
        self.declares = true;
        self
    }

    /// Number of table entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl NamespaceHandler for SchemaTableHandler {
    fn schema_location(&self, namespace: &str) -> Option<SchemaLocation> {
        self.schemas.get(namespace).cloned()
    }

    fn declared_namespaces(&self) -> Option<Vec<String>> {
        self.declares.then(|| self.schemas.keys().cloned().collect())
    }
}

/// Resolves a family of namespace versions by URI rewriting
///
/// A namespace containing `marker` is rewritten with `sibling` in its place
/// and resolved through the wrapped handler; anything else is passed
/// through unchanged. Never declares namespaces, so the loader offers it
/// the scanned inventory.
#[derive(Debug, Clone)]
pub struct FamilyAliasHandler<H> {
    inner: H,
    marker: String,
    sibling: String,
}

impl<H: NamespaceHandler> FamilyAliasHandler<H> {
    /// Wrap `inner`, rewriting `marker` to `sibling`
    #[must_use]
    pub fn new(inner: H, marker: impl Into<String>, sibling: impl Into<String>) -> Self {
        Self {
            inner,
            marker: marker.into(),
            sibling: sibling.into(),
        }
    }

    /// The namespace actually handed to the wrapped handler
    #[must_use]
    pub fn rewrite(&self, namespace: &str) -> String {
        if !self.marker.is_empty() && namespace.contains(&self.marker) {
            namespace.replace(&self.marker, &self.sibling)
        } else {
            namespace.to_string()
        }
    }
}

impl<H: NamespaceHandler> NamespaceHandler for FamilyAliasHandler<H> {
    fn schema_location(&self, namespace: &str) -> Option<SchemaLocation> {
        self.inner.schema_location(&self.rewrite(namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXT_V1: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-ext/v1.0.0";
    const CM_V1: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.0.0";

    fn schema(name: &str) -> SchemaLocation {
        SchemaLocation::parse(&format!("classpath:/schemas/{name}")).unwrap()
    }

    fn ext_table() -> SchemaTableHandler {
        SchemaTableHandler::new().with_schema(EXT_V1, schema("ext-1.0.xsd"))
    }

    #[test]
    fn table_resolves_known_namespaces() {
        let table = ext_table();
        assert_eq!(table.schema_location(EXT_V1), Some(schema("ext-1.0.xsd")));
        assert_eq!(table.schema_location("urn:other"), None);
        assert_eq!(table.declared_namespaces(), None);
    }

    #[test]
    fn declaring_table_lists_namespaces() {
        let table = ext_table().declaring();
        assert_eq!(table.declared_namespaces(), Some(vec![EXT_V1.to_string()]));
    }

    #[test]
    fn alias_rewrites_marker() {
        let cm =
            FamilyAliasHandler::new(ext_table().declaring(), "blueprint-cm/v", "blueprint-ext/v");
        assert_eq!(cm.rewrite(CM_V1), EXT_V1);
        assert_eq!(cm.schema_location(CM_V1), Some(schema("ext-1.0.xsd")));
        // unmarked URIs pass through
        assert_eq!(cm.schema_location(EXT_V1), Some(schema("ext-1.0.xsd")));
        assert_eq!(cm.schema_location("urn:other"), None);
        // aliasing hides the wrapped declaration
        assert_eq!(cm.declared_namespaces(), None);
    }

    #[test]
    fn arc_handler_delegates() {
        let shared: Arc<dyn NamespaceHandler> = Arc::new(ext_table().declaring());
        assert_eq!(shared.schema_location(EXT_V1), Some(schema("ext-1.0.xsd")));
        assert!(shared.declared_namespaces().is_some());
    }

    proptest! {
        #[test]
        fn prop_alias_matches_sibling_resolution(
            prefix in "[a-z]{1,8}",
            version in "[0-9]\\.[0-9]\\.[0-9]",
        ) {
            let sibling_uri = format!("http://{prefix}/blueprint-ext/v{version}");
            let marked_uri = format!("http://{prefix}/blueprint-cm/v{version}");
            let inner = SchemaTableHandler::new().with_schema(sibling_uri.clone(), schema("x.xsd"));
            let alias = FamilyAliasHandler::new(inner.clone(), "blueprint-cm/v", "blueprint-ext/v");

            prop_assert_eq!(
                alias.schema_location(&marked_uri),
                inner.schema_location(&sibling_uri)
            );
            prop_assert!(alias.schema_location(&marked_uri).is_some());
        }
    }
}
