//! Extension loader
//!
//! Turns manifests into a [`NamespaceHandlerSet`]. For every listed
//! extension:
//! 1. create it from the [`ExtensionRegistry`] (failure aborts the run)
//! 2. take its declared namespaces, or the scanned inventory if it declares none
//! 3. ask it for a schema per candidate; bind those it resolves

use crate::error::ExtensionError;
use crate::handler_set::{NamespaceConflict, NamespaceHandlerSet};
use crate::manifest::Manifest;
use crate::registry::ExtensionRegistry;
use graft_model::{ExtensionDescriptor, NamespaceInventory};
use indexmap::IndexMap;

/// Loads the extensions listed in manifests
#[derive(Debug)]
pub struct ExtensionLoader<'r> {
    registry: &'r ExtensionRegistry,
    conflict: NamespaceConflict,
}

impl<'r> ExtensionLoader<'r> {
    /// Create loader over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: &'r ExtensionRegistry) -> Self {
        Self {
            registry,
            conflict: NamespaceConflict::default(),
        }
    }

    /// Set conflict policy
    #[inline]
    #[must_use]
    pub fn with_conflict(mut self, conflict: NamespaceConflict) -> Self {
        self.conflict = conflict;
        self
    }

    /// Load every extension listed in `manifests`, in order
    ///
    /// # Errors
    /// Returns error if any listed extension is unknown or cannot be created
    pub fn load(
        &self,
        manifests: &[Manifest],
        inventory: &NamespaceInventory,
    ) -> Result<NamespaceHandlerSet, ExtensionError> {
        let mut set = NamespaceHandlerSet::with_conflict(self.conflict);

        for manifest in manifests {
            tracing::debug!("Loading extensions from {}", manifest.location());
            for extension_id in manifest.extension_ids() {
                let descriptor = self.load_extension(extension_id, inventory, &mut set)?;
                set.push_descriptor(descriptor);
            }
        }

        tracing::info!(
            "Loaded {} extension(s) serving {} namespace(s)",
            set.descriptors().len(),
            set.len()
        );
        Ok(set)
    }

    fn load_extension(
        &self,
        extension_id: &str,
        inventory: &NamespaceInventory,
        set: &mut NamespaceHandlerSet,
    ) -> Result<ExtensionDescriptor, ExtensionError> {
        let handler = self.registry.create(extension_id)?;
        let declared = handler.declared_namespaces();
        let candidates: Vec<String> = match &declared {
            Some(namespaces) => namespaces.clone(),
            None => {
                tracing::debug!(
                    "Extension '{}' declares no namespaces, offering {} scanned",
                    extension_id,
                    inventory.len()
                );
                inventory.iter().map(str::to_string).collect()
            }
        };

        let mut schemas = IndexMap::new();
        for namespace in candidates {
            match handler.schema_location(&namespace) {
                Some(schema) => {
                    set.add_namespace(&namespace, schema.clone(), extension_id, handler.clone());
                    schemas.insert(namespace, schema);
                }
                None => tracing::trace!("Extension '{}' skips {}", extension_id, namespace),
            }
        }

        Ok(ExtensionDescriptor::new(extension_id, declared, schemas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::SchemaTableHandler;
    use crate::registry::{CM_EXTENSION_ID, EXT_EXTENSION_ID};
    use graft_model::SchemaLocation;
    use proptest::prelude::*;

    const CM_V1_1: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0";
    const EXT_V1_0: &str = "http://aries.apache.org/blueprint/xmlns/blueprint-ext/v1.0.0";

    fn schema(name: &str) -> SchemaLocation {
        SchemaLocation::parse(&format!("classpath:/{name}")).unwrap()
    }

    fn manifest(ids: &str) -> Manifest {
        Manifest::parse_str("test.handlers", ids).unwrap()
    }

    #[test]
    fn declared_namespaces_are_used_directly() {
        let registry = ExtensionRegistry::with_defaults().unwrap();
        let set = ExtensionLoader::new(&registry)
            .load(&[manifest(EXT_EXTENSION_ID)], &NamespaceInventory::new())
            .unwrap();

        // all six ext versions without any scanned document
        assert_eq!(set.len(), 6);
        assert_eq!(set.get(EXT_V1_0).unwrap().extension_id, EXT_EXTENSION_ID);
        assert!(!set.descriptors()[0].is_inferred());
    }

    #[test]
    fn undeclared_extension_is_offered_inventory() {
        let registry = ExtensionRegistry::with_defaults().unwrap();
        let inventory: NamespaceInventory =
            [CM_V1_1, "http://www.osgi.org/xmlns/blueprint/v1.0.0"].into_iter().collect();

        let set = ExtensionLoader::new(&registry)
            .load(&[manifest(CM_EXTENSION_ID)], &inventory)
            .unwrap();

        assert_eq!(set.namespaces().collect::<Vec<_>>(), vec![CM_V1_1]);
        let descriptor = &set.descriptors()[0];
        assert!(descriptor.is_inferred());
        assert_eq!(descriptor.namespaces().collect::<Vec<_>>(), vec![CM_V1_1]);
    }

    #[test]
    fn unknown_extension_aborts() {
        let registry = ExtensionRegistry::with_defaults().unwrap();
        let err = ExtensionLoader::new(&registry)
            .load(&[manifest("cm\nmissing\n")], &NamespaceInventory::new())
            .unwrap_err();
        assert!(matches!(err, ExtensionError::UnknownExtension(ref id) if id == "missing"));
    }

    #[test]
    fn later_manifest_overrides_earlier() {
        let mut registry = ExtensionRegistry::new();
        registry.register_handler(
            "first",
            SchemaTableHandler::new().with_schema("urn:a", schema("first.xsd")).declaring(),
        );
        registry.register_handler(
            "second",
            SchemaTableHandler::new().with_schema("urn:a", schema("second.xsd")).declaring(),
        );

        let manifests = [manifest("first"), manifest("second")];
        let set = ExtensionLoader::new(&registry)
            .load(&manifests, &NamespaceInventory::new())
            .unwrap();
        assert_eq!(set.schema("urn:a"), Some(&schema("second.xsd")));

        let set = ExtensionLoader::new(&registry)
            .with_conflict(NamespaceConflict::FirstRegisteredWins)
            .load(&manifests, &NamespaceInventory::new())
            .unwrap();
        assert_eq!(set.schema("urn:a"), Some(&schema("first.xsd")));
    }

    proptest! {
        #[test]
        fn prop_last_listed_extension_wins(order in proptest::collection::vec(0..3usize, 1..8)) {
            let mut registry = ExtensionRegistry::new();
            for id in 0..3 {
                registry.register_handler(
                    format!("ext{id}"),
                    SchemaTableHandler::new()
                        .with_schema("urn:shared", schema(&format!("{id}.xsd")))
                        .declaring(),
                );
            }
            let manifests: Vec<Manifest> =
                order.iter().map(|id| manifest(&format!("ext{id}"))).collect();

            let set = ExtensionLoader::new(&registry)
                .load(&manifests, &NamespaceInventory::new())
                .unwrap();

            let last = order.last().unwrap();
            prop_assert_eq!(
                &set.get("urn:shared").unwrap().extension_id,
                &format!("ext{last}")
            );
            prop_assert_eq!(set.descriptors().len(), order.len());
        }
    }
}
