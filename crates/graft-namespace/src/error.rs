//! Error types for namespace discovery
//!
//! Provides error handling for:
//! - Resource reads (documents and manifests)
//! - Document scanning (namespace inventory)
//! - Manifest parsing
//! - Extension creation

use std::path::PathBuf;

/// Errors reading a resource from disk
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// IO error during read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while scanning a document for namespace bindings
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// XML syntax error
    #[error("malformed document {location} at byte {position}: {message}")]
    Malformed {
        /// Document location
        location: String,
        /// Byte offset of the event that failed
        position: u64,
        /// Parser message
        message: String,
    },

    /// Document contains no element at all
    #[error("document {location} has no root element")]
    NoRootElement {
        /// Document location
        location: String,
    },

    /// Document ended with open elements
    #[error("document {location} ended with {depth} unclosed element(s)")]
    UnclosedElement {
        /// Document location
        location: String,
        /// Number of elements left open
        depth: usize,
    },

    /// Element after the root element was closed
    #[error("document {location} has a second root element at byte {position}")]
    MultipleRoots {
        /// Document location
        location: String,
        /// Byte offset of the extra element
        position: u64,
    },

    /// Character data before or after the root element
    #[error("document {location} has content outside the root element at byte {position}")]
    ContentOutsideRoot {
        /// Document location
        location: String,
        /// Byte offset of the content
        position: u64,
    },

    /// Element uses a prefix no enclosing element binds
    #[error("document {location} uses unbound prefix '{prefix}'")]
    UnboundPrefix {
        /// Document location
        location: String,
        /// The unbound prefix
        prefix: String,
    },
}

impl ScanError {
    /// Create syntax error for location
    pub fn malformed(
        location: impl Into<String>,
        position: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            location: location.into(),
            position,
            message: message.into(),
        }
    }
}

/// Errors while parsing an extension manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest is not valid UTF-8
    #[error("manifest {location} is not valid UTF-8")]
    Encoding {
        /// Manifest location
        location: String,
    },

    /// Key escape sequence cut off by end of input
    #[error("manifest {location} line {line}: dangling escape")]
    DanglingEscape {
        /// Manifest location
        location: String,
        /// One-based line of the escape
        line: usize,
    },
}

/// Errors while creating extensions
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    /// Manifest names an extension nobody registered
    #[error("unknown extension: '{0}'")]
    UnknownExtension(String),

    /// Extension factory failed
    #[error("extension '{extension_id}' could not be created: {message}")]
    InstantiationFailed {
        /// Extension identifier
        extension_id: String,
        /// Factory message
        message: String,
    },
}

impl ExtensionError {
    /// Create instantiation error for extension
    pub fn instantiation_failed(
        extension_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InstantiationFailed {
            extension_id: extension_id.into(),
            message: message.into(),
        }
    }
}

/// Combined namespace discovery error
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// Resource unreadable
    #[error("resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Document malformed
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Manifest malformed
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Extension unknown or failing
    #[error("extension error: {0}")]
    Extension(#[from] ExtensionError),
}

/// Result type alias for namespace discovery
pub type NamespaceResult<T> = Result<T, NamespaceError>;
