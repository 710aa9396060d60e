//! Target registry capability and an in-memory definition store

use crate::error::RegistryError;
use graft_model::TargetDefinition;
use indexmap::IndexMap;

/// Sink accepting translated definitions
pub trait TargetRegistry {
    /// Store `definition` under `component_id`, replacing any existing one
    ///
    /// # Errors
    /// Returns error if the registry refuses the definition
    fn register_definition(
        &mut self,
        component_id: &str,
        definition: TargetDefinition,
    ) -> Result<(), RegistryError>;
}

/// Definition store keeping registration order
///
/// Overwrites keep the position of the first registration.
#[derive(Debug, Clone, Default)]
pub struct DefinitionStore {
    definitions: IndexMap<String, TargetDefinition>,
}

impl DefinitionStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Definition by identifier
    #[inline]
    #[must_use]
    pub fn get(&self, component_id: &str) -> Option<&TargetDefinition> {
        self.definitions.get(component_id)
    }

    /// Check if identifier is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, component_id: &str) -> bool {
        self.definitions.contains_key(component_id)
    }

    /// Registered identifiers
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// All definitions
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TargetDefinition)> {
        self.definitions.iter().map(|(id, d)| (id.as_str(), d))
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Consume into the underlying map
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, TargetDefinition> {
        self.definitions
    }
}

impl TargetRegistry for DefinitionStore {
    fn register_definition(
        &mut self,
        component_id: &str,
        definition: TargetDefinition,
    ) -> Result<(), RegistryError> {
        if self
            .definitions
            .insert(component_id.to_string(), definition)
            .is_some()
        {
            tracing::debug!("Replaced existing definition '{}'", component_id);
        }
        Ok(())
    }
}
