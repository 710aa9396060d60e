//! Error types for graft core
//!
//! Provides error handling for:
//! - Resource location (search roots and glob patterns)
//! - Configuration loading
//! - Source container bootstrap
//! - Whole-pipeline failures

use graft_namespace::{NamespaceError, ResourceError};
use graft_translate::TranslateError;
use std::path::PathBuf;

/// Errors while locating documents and manifests
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    /// Invalid glob pattern
    #[error("invalid pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Directory walk failed
    #[error("walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Search root does not exist
    #[error("search root {0} does not exist")]
    MissingRoot(PathBuf),

    /// Located file unreadable
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::GraftConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors while building the source container
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Documents bind namespaces nothing can handle
    #[error("unresolved namespace(s): {}", namespaces.join(", "))]
    UnresolvedNamespace {
        /// Unhandled namespaces, sorted
        namespaces: Vec<String>,
    },

    /// Source runtime refused to construct the container
    #[error("container construction failed: {message}")]
    Runtime {
        /// Runtime message
        message: String,
    },
}

impl BootstrapError {
    /// Create runtime construction error
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

/// Umbrella error for the graft pipeline
#[derive(Debug, thiserror::Error)]
pub enum GraftError {
    /// Locating resources failed
    #[error("locate failed: {0}")]
    Locate(#[from] LocateError),

    /// Configuration failed
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading, scanning or extension loading failed
    #[error("namespace error: {0}")]
    Namespace(#[from] NamespaceError),

    /// Bootstrap failed
    #[error("bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// Translation failed
    #[error("translation failed: {0}")]
    Translate(#[from] TranslateError),
}

/// Pipeline stage a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Locating and reading documents and manifests
    Resources,
    /// Building the namespace inventory
    Inventory,
    /// Creating extensions and the namespace lookup table
    Extensions,
    /// Building the source container
    Bootstrap,
    /// Translating components into the target registry
    Translate,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Resources => "resources",
            Self::Inventory => "inventory",
            Self::Extensions => "extensions",
            Self::Bootstrap => "bootstrap",
            Self::Translate => "translate",
        };
        f.write_str(name)
    }
}

/// Single error surfaced by a failed pipeline run
#[derive(Debug, thiserror::Error)]
#[error("graph translation failed during {stage}: {source}")]
pub struct TranslationFailure {
    stage: Stage,
    #[source]
    source: GraftError,
}

impl TranslationFailure {
    /// Wrap `source` as a failure of `stage`
    pub fn new(stage: Stage, source: impl Into<GraftError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// Stage that failed
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Original cause
    #[inline]
    #[must_use]
    pub fn cause(&self) -> &GraftError {
        &self.source
    }

    /// Consume into the original cause
    #[inline]
    #[must_use]
    pub fn into_cause(self) -> GraftError {
        self.source
    }

    /// Check if the source container was built before the failure
    #[inline]
    #[must_use]
    pub fn after_bootstrap(&self) -> bool {
        self.stage == Stage::Translate
    }
}

/// Result alias for graft core operations
pub type GraftResult<T> = Result<T, GraftError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unresolved_namespace_lists_all() {
        let err = BootstrapError::UnresolvedNamespace {
            namespaces: vec!["urn:a".to_string(), "urn:b".to_string()],
        };
        assert_eq!(err.to_string(), "unresolved namespace(s): urn:a, urn:b");
    }

    #[test]
    fn failure_keeps_cause() {
        let failure = TranslationFailure::new(
            Stage::Translate,
            TranslateError::MissingInstance("a".to_string()),
        );

        assert!(failure.after_bootstrap());
        assert!(matches!(
            failure.cause(),
            GraftError::Translate(TranslateError::MissingInstance(_))
        ));
        assert!(failure.to_string().contains("during translate"));
        assert!(failure.source().is_some());
    }

    #[test]
    fn bootstrap_failure_is_not_after_bootstrap() {
        let failure = TranslationFailure::new(Stage::Bootstrap, BootstrapError::runtime("boom"));
        assert!(!failure.after_bootstrap());
        assert_eq!(failure.stage(), Stage::Bootstrap);
    }
}
