//! Extension descriptors
//!
//! Describes one loaded namespace extension after its schema locations have
//! been resolved.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Location of the schema that validates a namespace
pub type SchemaLocation = url::Url;

/// A loaded extension and the namespaces it resolved
///
/// Built once per run by the extension loader and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    extension_id: String,
    declared_namespaces: Option<Vec<String>>,
    schemas: IndexMap<String, SchemaLocation>,
}

impl ExtensionDescriptor {
    /// Create descriptor
    ///
    /// `declared_namespaces` is `None` when the extension did not declare its
    /// namespaces and was offered the scanned inventory instead.
    #[must_use]
    pub fn new(
        extension_id: impl Into<String>,
        declared_namespaces: Option<Vec<String>>,
        schemas: IndexMap<String, SchemaLocation>,
    ) -> Self {
        Self {
            extension_id: extension_id.into(),
            declared_namespaces,
            schemas,
        }
    }

    /// Identifier the extension was registered under
    #[inline]
    #[must_use]
    pub fn extension_id(&self) -> &str {
        &self.extension_id
    }

    /// Statically declared namespaces, if any
    #[inline]
    #[must_use]
    pub fn declared_namespaces(&self) -> Option<&[String]> {
        self.declared_namespaces.as_deref()
    }

    /// Whether the candidate namespaces came from the document scan
    #[inline]
    #[must_use]
    pub fn is_inferred(&self) -> bool {
        self.declared_namespaces.is_none()
    }

    /// Resolved schema location for a namespace
    #[inline]
    #[must_use]
    pub fn schema_for(&self, namespace: &str) -> Option<&SchemaLocation> {
        self.schemas.get(namespace)
    }

    /// Namespaces this extension resolved, in resolution order
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// All resolved (namespace, schema) pairs
    #[inline]
    #[must_use]
    pub fn schemas(&self) -> &IndexMap<String, SchemaLocation> {
        &self.schemas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(path: &str) -> SchemaLocation {
        SchemaLocation::parse(&format!("classpath:/{path}")).unwrap()
    }

    #[test]
    fn descriptor_inferred_when_undeclared() {
        let mut schemas = IndexMap::new();
        schemas.insert("urn:cm".to_string(), schema("cm.xsd"));
        let descriptor = ExtensionDescriptor::new("cm", None, schemas);

        assert!(descriptor.is_inferred());
        assert_eq!(descriptor.namespaces().collect::<Vec<_>>(), vec!["urn:cm"]);
        assert_eq!(
            descriptor.schema_for("urn:cm").map(SchemaLocation::as_str),
            Some("classpath:/cm.xsd")
        );
    }

    #[test]
    fn descriptor_declared() {
        let descriptor =
            ExtensionDescriptor::new("ext", Some(vec!["urn:ext".to_string()]), IndexMap::new());
        assert!(!descriptor.is_inferred());
        assert_eq!(descriptor.declared_namespaces(), Some(&["urn:ext".to_string()][..]));
        assert!(descriptor.schema_for("urn:ext").is_none());
    }
}
