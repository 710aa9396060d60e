//! Graft Core
//!
//! Bridges a source component container described by XML documents to a
//! target definition registry.
//!
//! # Architecture
//!
//! ```text
//! ResourceLocator ──▶ LifecycleCoordinator ──▶ TargetRegistry
//!                           │
//!                           ▼
//!                     SourceRuntime ──▶ SourceContainer
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use graft_core::prelude::*;
//!
//! let config = GraftConfig::load(Path::new("graft.toml"))?;
//! let extensions = ExtensionRegistry::with_defaults()?;
//! let coordinator = LifecycleCoordinator::from_config(&extensions, &runtime, &config);
//! let mut store = DefinitionStore::new();
//! let report = coordinator.run_located(&config, &mut store)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod bootstrap;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod locator;
pub mod runtime;

pub use bootstrap::{Bootstrapped, Bootstrapper};
pub use config::{
    GraftConfig, DEFAULT_DOCUMENT_PATTERN, DEFAULT_EXTRA_DOCUMENT_PATTERN,
    DEFAULT_MANIFEST_PATTERN,
};
pub use coordinator::LifecycleCoordinator;
pub use error::{
    BootstrapError, ConfigError, GraftError, GraftResult, LocateError, Stage, TranslationFailure,
};
pub use locator::ResourceLocator;
pub use runtime::SourceRuntime;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running graft
    pub use crate::{
        GraftConfig, LifecycleCoordinator, ResourceLocator, SourceRuntime, TranslationFailure,
    };
    pub use graft_namespace::{ExtensionRegistry, NamespaceConflict};
    pub use graft_translate::{
        ComponentErrorPolicy, DefinitionStore, SourceContainer, TargetRegistry, TranslationReport,
    };
}
