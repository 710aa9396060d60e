//! Graft Translation
//!
//! Re-expresses the components of a live source container as definitions
//! in a target registry.
//!
//! # Core Concepts
//!
//! - [`SourceContainer`]: read access to the bootstrapped component graph
//! - [`TargetRegistry`]: sink for translated definitions
//! - [`ComponentTranslator`]: classification, type repair and wiring
//! - [`DefinitionStore`]: in-memory [`TargetRegistry`]
//!
//! # Example
//!
//! ```rust,ignore
//! use graft_translate::{ComponentTranslator, DefinitionStore};
//!
//! let ids = container.component_ids();
//! let mut store = DefinitionStore::new();
//! let report = ComponentTranslator::new().translate(&container, &ids, &mut store)?;
//! assert_eq!(report.registered.len(), store.len());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod registry;
pub mod report;
pub mod source;
pub mod translator;

pub use error::{RegistryError, TranslateError, TranslateResult};
pub use registry::{DefinitionStore, TargetRegistry};
pub use report::{SkippedComponent, TranslationReport};
pub use source::{ComponentInstance, SourceContainer};
pub use translator::{ComponentErrorPolicy, ComponentTranslator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for translation
    pub use crate::{
        ComponentErrorPolicy, ComponentInstance, ComponentTranslator, DefinitionStore,
        SourceContainer, TargetRegistry, TranslationReport,
    };
}
