//! Graft configuration

use crate::error::ConfigError;
use graft_model::{INTERNAL_TYPE_MARKER, UNTYPED_PLACEHOLDER};
use graft_namespace::NamespaceConflict;
use graft_translate::ComponentErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Conventional location of primary declarative documents
pub const DEFAULT_DOCUMENT_PATTERN: &str = "**/OSGI-INF/blueprint/blueprint.xml";

/// Conventional location of extra extension documents
pub const DEFAULT_EXTRA_DOCUMENT_PATTERN: &str = "**/OSGI-INF/blueprint/blueprint-ext.xml";

/// Conventional location of extension manifests
pub const DEFAULT_MANIFEST_PATTERN: &str = "**/META-INF/blueprint.handlers";

/// Settings for one graft run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraftConfig {
    /// Directories searched for documents and manifests
    pub search_roots: Vec<PathBuf>,
    /// Glob patterns for primary documents, relative to a search root
    pub document_patterns: Vec<String>,
    /// Glob patterns for extra documents
    pub extra_document_patterns: Vec<String>,
    /// Whether extra documents join the primary ones
    pub include_extra_documents: bool,
    /// Glob patterns for extension manifests
    pub manifest_patterns: Vec<String>,
    /// Substring marking runtime-internal component types
    pub internal_marker: String,
    /// Nominal "any object" type retyped on constructor references
    pub placeholder: String,
    /// Tie-break when two extensions resolve one namespace
    pub namespace_conflict: NamespaceConflict,
    /// What a failing component does to the run
    pub component_errors: ComponentErrorPolicy,
    /// Trace every component after bootstrap
    pub dump_components: bool,
}

impl Default for GraftConfig {
    fn default() -> Self {
        Self {
            search_roots: vec![PathBuf::from(".")],
            document_patterns: vec![DEFAULT_DOCUMENT_PATTERN.to_string()],
            extra_document_patterns: vec![DEFAULT_EXTRA_DOCUMENT_PATTERN.to_string()],
            include_extra_documents: false,
            manifest_patterns: vec![DEFAULT_MANIFEST_PATTERN.to_string()],
            internal_marker: INTERNAL_TYPE_MARKER.to_string(),
            placeholder: UNTYPED_PLACEHOLDER.to_string(),
            namespace_conflict: NamespaceConflict::default(),
            component_errors: ComponentErrorPolicy::default(),
            dump_components: false,
        }
    }
}

impl GraftConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file is unreadable or not valid TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if `text` is not valid TOML for this struct
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// With search roots, replacing the defaults
    #[inline]
    #[must_use]
    pub fn with_search_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// With an additional search root
    #[inline]
    #[must_use]
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// With primary document patterns
    #[inline]
    #[must_use]
    pub fn with_document_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// With extra documents enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_extra_documents(mut self, include: bool) -> Self {
        self.include_extra_documents = include;
        self
    }

    /// With manifest patterns
    #[inline]
    #[must_use]
    pub fn with_manifest_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// With internal-type marker
    #[inline]
    #[must_use]
    pub fn with_internal_marker(mut self, marker: impl Into<String>) -> Self {
        self.internal_marker = marker.into();
        self
    }

    /// With untyped placeholder
    #[inline]
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// With namespace conflict policy
    #[inline]
    #[must_use]
    pub fn with_namespace_conflict(mut self, conflict: NamespaceConflict) -> Self {
        self.namespace_conflict = conflict;
        self
    }

    /// With component error policy
    #[inline]
    #[must_use]
    pub fn with_component_errors(mut self, policy: ComponentErrorPolicy) -> Self {
        self.component_errors = policy;
        self
    }

    /// With component dump after bootstrap
    #[inline]
    #[must_use]
    pub fn with_dump_components(mut self, dump: bool) -> Self {
        self.dump_components = dump;
        self
    }

    /// Document patterns in effect, extra ones included when enabled
    #[must_use]
    pub fn effective_document_patterns(&self) -> Vec<String> {
        let mut patterns = self.document_patterns.clone();
        if self.include_extra_documents {
            patterns.extend(self.extra_document_patterns.iter().cloned());
        }
        patterns
    }
}
