//! Target definitions
//!
//! Output of the translator: one definition per user component, written to
//! the target registry under the source component's identifier.

use serde::{Deserialize, Serialize};

/// How the target registry autowires collaborators
///
/// Translated definitions always autowire by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutowireMode {
    /// Autowire properties by bean name
    #[default]
    ByName,
}

/// Instance scope in the target registry
///
/// Translated definitions wrap one live source instance, so they are
/// always singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// One shared instance
    #[default]
    Singleton,
}

/// Value carried by a constructor or property wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Wiring {
    /// Named reference to another definition
    Reference(String),

    /// Inline string value
    Literal(String),
}

impl Wiring {
    /// Reference wiring
    #[inline]
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Literal wiring
    #[inline]
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Referenced definition name, if this is a reference
    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

/// Indexed constructor argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorArg {
    /// Position in the constructor signature
    pub index: usize,

    /// Nominal type used for overload resolution
    pub type_name: Option<String>,

    /// Argument value
    pub value: Wiring,
}

/// Named property wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyWiring {
    /// Property name
    pub name: String,

    /// Property value
    pub value: Wiring,
}

/// Definition registered into the target registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDefinition {
    /// Implementation type name
    pub implementation_type: String,

    /// Autowire mode
    pub autowire: AutowireMode,

    /// Instance scope
    pub scope: Scope,

    /// Initializer method name
    pub init_method: Option<String>,

    /// Constructor arguments ordered by index
    pub constructor_args: Vec<ConstructorArg>,

    /// Property wirings in declaration order
    pub properties: Vec<PropertyWiring>,
}

impl TargetDefinition {
    /// Start building a definition for an implementation type
    #[inline]
    #[must_use]
    pub fn builder(implementation_type: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder::new(implementation_type)
    }

    /// Property wiring by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Wiring> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// Names of all definitions this one references
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.constructor_args
            .iter()
            .map(|a| &a.value)
            .chain(self.properties.iter().map(|p| &p.value))
            .filter_map(Wiring::as_reference)
    }
}

/// Builder for [`TargetDefinition`]
///
/// Defaults to by-name autowiring and singleton scope.
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    definition: TargetDefinition,
}

impl DefinitionBuilder {
    /// Create builder
    #[must_use]
    pub fn new(implementation_type: impl Into<String>) -> Self {
        Self {
            definition: TargetDefinition {
                implementation_type: implementation_type.into(),
                autowire: AutowireMode::default(),
                scope: Scope::default(),
                init_method: None,
                constructor_args: Vec::new(),
                properties: Vec::new(),
            },
        }
    }

    /// Set autowire mode
    #[inline]
    #[must_use]
    pub fn autowire(mut self, mode: AutowireMode) -> Self {
        self.definition.autowire = mode;
        self
    }

    /// Set scope
    #[inline]
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.definition.scope = scope;
        self
    }

    /// Set init method
    #[inline]
    #[must_use]
    pub fn init_method(mut self, method: Option<String>) -> Self {
        self.definition.init_method = method;
        self
    }

    /// Append constructor argument at the next index
    #[must_use]
    pub fn constructor_arg(mut self, type_name: Option<String>, value: Wiring) -> Self {
        let index = self.definition.constructor_args.len();
        self.definition.constructor_args.push(ConstructorArg {
            index,
            type_name,
            value,
        });
        self
    }

    /// Append property wiring
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: Wiring) -> Self {
        self.definition.properties.push(PropertyWiring {
            name: name.into(),
            value,
        });
        self
    }

    /// Finish
    #[inline]
    #[must_use]
    pub fn build(self) -> TargetDefinition {
        self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_defaults() {
        let definition = TargetDefinition::builder("com.acme.A").build();
        assert_eq!(definition.autowire, AutowireMode::ByName);
        assert_eq!(definition.scope, Scope::Singleton);
        assert!(definition.init_method.is_none());
        assert!(definition.constructor_args.is_empty());
    }

    #[test]
    fn builder_indexes_constructor_args() {
        let definition = TargetDefinition::builder("com.acme.B")
            .constructor_arg(Some("com.acme.A".to_string()), Wiring::reference("a"))
            .constructor_arg(Some("int".to_string()), Wiring::literal("3"))
            .build();

        let indices: Vec<_> = definition.constructor_args.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(definition.references().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn property_lookup() {
        let definition = TargetDefinition::builder("com.acme.C")
            .property("name", Wiring::literal("x"))
            .property("peer", Wiring::reference("d"))
            .build();

        assert_eq!(definition.property("name"), Some(&Wiring::literal("x")));
        assert_eq!(definition.property("missing"), None);
        assert_eq!(definition.references().collect::<Vec<_>>(), vec!["d"]);
    }

    #[test]
    fn only_by_name_singletons_deserialize() {
        let autowire: AutowireMode = serde_json::from_str("\"by_name\"").unwrap();
        let scope: Scope = serde_json::from_str("\"singleton\"").unwrap();
        assert_eq!((autowire, scope), (AutowireMode::ByName, Scope::Singleton));

        assert!(serde_json::from_str::<AutowireMode>("\"by_type\"").is_err());
        assert!(serde_json::from_str::<Scope>("\"prototype\"").is_err());
    }
}
