//! Graft Model
//!
//! Shared data model for the two sides of a graft run.
//!
//! # Core Concepts
//!
//! - [`NamespaceInventory`]: namespace URIs observed in declarative documents
//! - [`ExtensionDescriptor`]: a loaded extension and the schemas it resolved
//! - [`ComponentMetadata`]: read-only description of one source component
//! - [`TargetDefinition`]: the translated definition written to the target registry
//!
//! # Example
//!
//! ```rust
//! use graft_model::{AutowireMode, Scope, TargetDefinition, Wiring};
//!
//! let definition = TargetDefinition::builder("com.acme.Greeter")
//!     .property("name", Wiring::literal("x"))
//!     .init_method(Some("start".to_string()))
//!     .build();
//!
//! assert_eq!(definition.autowire, AutowireMode::ByName);
//! assert_eq!(definition.scope, Scope::Singleton);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod definition;
pub mod extension;
pub mod inventory;
pub mod metadata;

pub use definition::{
    AutowireMode, ConstructorArg, DefinitionBuilder, PropertyWiring, Scope, TargetDefinition,
    Wiring,
};
pub use extension::{ExtensionDescriptor, SchemaLocation};
pub use inventory::NamespaceInventory;
pub use metadata::{BeanArgument, BeanMetadata, BeanProperty, ComponentMetadata, MetadataValue};

/// Nominal type the source dialect uses for "any object".
///
/// Constructor references declared with this type are retyped to the
/// referenced instance's concrete type during translation.
pub const UNTYPED_PLACEHOLDER: &str = "java.lang.Object";

/// Substring that marks a runtime type as belonging to the source runtime itself.
pub const INTERNAL_TYPE_MARKER: &str = "blueprint";

/// Core namespace of the source dialect, handled by the runtime without extensions.
pub const BLUEPRINT_CORE_NAMESPACE: &str = "http://www.osgi.org/xmlns/blueprint/v1.0.0";

/// Namespaces that are part of XML itself and never need an extension.
pub const RESERVED_XML_NAMESPACES: &[&str] = &[
    "http://www.w3.org/XML/1998/namespace",
    "http://www.w3.org/2000/xmlns/",
    "http://www.w3.org/2001/XMLSchema-instance",
];

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the graft model
    pub use crate::{
        AutowireMode, BeanArgument, BeanMetadata, BeanProperty, ComponentMetadata,
        ConstructorArg, ExtensionDescriptor, MetadataValue, NamespaceInventory, PropertyWiring,
        SchemaLocation, Scope, TargetDefinition, Wiring,
    };
}
