//! Component metadata
//!
//! Read-only structural description of the components managed by a source
//! container. The translator reads this; it never mutates it.

use serde::{Deserialize, Serialize};

/// Structural metadata of one source component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentMetadata {
    /// Bean-like component: class, arguments, properties, init method
    Bean(BeanMetadata),

    /// Any other shape (service reference, service export, ...)
    Other {
        /// Shape name as reported by the source runtime
        shape: String,
    },
}

impl ComponentMetadata {
    /// Bean metadata, if this component is bean-shaped
    #[inline]
    #[must_use]
    pub fn as_bean(&self) -> Option<&BeanMetadata> {
        match self {
            Self::Bean(bean) => Some(bean),
            Self::Other { .. } => None,
        }
    }

    /// Short name of the metadata shape
    #[must_use]
    pub fn shape(&self) -> &str {
        match self {
            Self::Bean(_) => "bean",
            Self::Other { shape } => shape,
        }
    }
}

impl From<BeanMetadata> for ComponentMetadata {
    fn from(bean: BeanMetadata) -> Self {
        Self::Bean(bean)
    }
}

/// Metadata of a bean-shaped component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanMetadata {
    /// Explicit implementation type name
    pub class_name: Option<String>,

    /// Runtime type declared instead of a class name
    pub runtime_class: Option<String>,

    /// Constructor arguments in declaration order
    pub arguments: Vec<BeanArgument>,

    /// Named properties
    pub properties: Vec<BeanProperty>,

    /// Initializer method name
    pub init_method: Option<String>,
}

impl BeanMetadata {
    /// Create empty bean metadata
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With explicit class name
    #[inline]
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// With declared runtime type
    #[inline]
    #[must_use]
    pub fn with_runtime_class(mut self, runtime_class: impl Into<String>) -> Self {
        self.runtime_class = Some(runtime_class.into());
        self
    }

    /// Append constructor argument
    #[inline]
    #[must_use]
    pub fn with_argument(mut self, argument: BeanArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Append property
    #[inline]
    #[must_use]
    pub fn with_property(mut self, property: BeanProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// With init method
    #[inline]
    #[must_use]
    pub fn with_init_method(mut self, method: impl Into<String>) -> Self {
        self.init_method = Some(method.into());
        self
    }
}

/// Positional constructor argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanArgument {
    /// Declared nominal type
    pub value_type: Option<String>,

    /// Argument value
    pub value: MetadataValue,
}

impl BeanArgument {
    /// Reference argument
    #[must_use]
    pub fn reference(component_id: impl Into<String>, value_type: Option<&str>) -> Self {
        Self {
            value_type: value_type.map(str::to_string),
            value: MetadataValue::reference(component_id),
        }
    }

    /// Literal argument
    #[must_use]
    pub fn literal(value: impl Into<String>, value_type: Option<&str>) -> Self {
        Self {
            value_type: value_type.map(str::to_string),
            value: MetadataValue::literal(value, None),
        }
    }
}

/// Named property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanProperty {
    /// Property name
    pub name: String,

    /// Property value
    pub value: MetadataValue,
}

impl BeanProperty {
    /// Create property
    #[must_use]
    pub fn new(name: impl Into<String>, value: MetadataValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Value of an argument or property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MetadataValue {
    /// Names another component in the same graph
    Reference {
        /// Referenced component identifier
        component_id: String,
    },

    /// Inline string value
    Literal {
        /// Raw string value
        value: String,
        /// Nominal type attached to the literal
        type_name: Option<String>,
    },

    /// Any other value shape (collections, inline components, ...)
    Other {
        /// Shape name as reported by the source runtime
        shape: String,
    },
}

impl MetadataValue {
    /// Reference value
    #[inline]
    #[must_use]
    pub fn reference(component_id: impl Into<String>) -> Self {
        Self::Reference {
            component_id: component_id.into(),
        }
    }

    /// Literal value
    #[inline]
    #[must_use]
    pub fn literal(value: impl Into<String>, type_name: Option<&str>) -> Self {
        Self::Literal {
            value: value.into(),
            type_name: type_name.map(str::to_string),
        }
    }

    /// Short name of the value shape
    #[must_use]
    pub fn shape(&self) -> &str {
        match self {
            Self::Reference { .. } => "reference",
            Self::Literal { .. } => "literal",
            Self::Other { shape } => shape,
        }
    }
}
