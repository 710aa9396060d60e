//! Graft Namespace Discovery
//!
//! Works out which namespace extensions serve which XML namespaces before
//! the source container is built.
//!
//! # Pipeline
//!
//! ```text
//! documents ──scan──▶ NamespaceInventory ─┐
//!                                         ├─▶ ExtensionLoader ──▶ NamespaceHandlerSet
//! manifests ──parse─▶ Manifest ids ───────┘         ▲
//!                                         ExtensionRegistry (factories)
//! ```
//!
//! # Example
//!
//! ```rust
//! use graft_namespace::{scan_documents, ExtensionLoader, ExtensionRegistry, Manifest, Resource};
//!
//! let document = Resource::from_bytes(
//!     "blueprint.xml",
//!     r#"<blueprint xmlns="http://www.osgi.org/xmlns/blueprint/v1.0.0"
//!            xmlns:cm="http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0"/>"#,
//! );
//! let inventory = scan_documents(&[document]).unwrap();
//!
//! let registry = ExtensionRegistry::with_defaults().unwrap();
//! let manifest = Manifest::parse_str("blueprint.handlers", "cm\n").unwrap();
//! let handlers = ExtensionLoader::new(&registry).load(&[manifest], &inventory).unwrap();
//!
//! assert!(handlers.contains("http://aries.apache.org/blueprint/xmlns/blueprint-cm/v1.1.0"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod handler;
pub mod handler_set;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod resource;
pub mod scan;

pub use error::{
    ExtensionError, ManifestError, NamespaceError, NamespaceResult, ResourceError, ScanError,
};
pub use handler::{FamilyAliasHandler, NamespaceHandler, SchemaTableHandler};
pub use handler_set::{NamespaceBinding, NamespaceConflict, NamespaceHandlerSet};
pub use loader::ExtensionLoader;
pub use manifest::{Manifest, DEFAULT_MANIFEST_PATH};
pub use registry::{
    ext_schema_table, ExtensionFactory, ExtensionRegistry, CM_EXTENSION_ID, EXT_EXTENSION_ID,
};
pub use resource::Resource;
pub use scan::{scan_document, scan_documents};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for namespace discovery
    pub use crate::{
        scan_documents, ExtensionLoader, ExtensionRegistry, Manifest, NamespaceConflict,
        NamespaceHandler, NamespaceHandlerSet, Resource,
    };
}
