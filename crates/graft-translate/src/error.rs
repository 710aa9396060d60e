//! Error types for translation
//!
//! Translation errors are reported per component; whether one aborts the
//! run is decided by [`ComponentErrorPolicy`](crate::ComponentErrorPolicy).

/// Errors raised by a target registry
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Registry refused the definition
    #[error("registry rejected definition '{component_id}': {reason}")]
    Rejected {
        /// Component the definition belongs to
        component_id: String,
        /// Registry's reason
        reason: String,
    },
}

impl RegistryError {
    /// Create rejection error
    pub fn rejected(component_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            component_id: component_id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors converting one source component
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Container enumerates a component it cannot produce
    #[error("component '{0}' has no live instance")]
    MissingInstance(String),

    /// Container enumerates a component without metadata
    #[error("component '{0}' has no metadata")]
    MissingMetadata(String),

    /// Reference to a component the container does not manage
    #[error("component '{component_id}' references unknown component '{reference}'")]
    UnresolvedReference {
        /// Component holding the reference
        component_id: String,
        /// Referenced identifier
        reference: String,
    },

    /// Value shape with no target equivalent
    #[error("component '{component_id}': {member} has unsupported {shape} value")]
    UnsupportedValue {
        /// Component holding the value
        component_id: String,
        /// Property or argument carrying the value
        member: String,
        /// Shape name of the value
        shape: String,
    },

    /// Target registry refused the definition
    #[error("registration failed: {0}")]
    Registry(#[from] RegistryError),
}

impl TranslateError {
    /// Create unresolved reference error
    pub fn unresolved(component_id: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            component_id: component_id.into(),
            reference: reference.into(),
        }
    }

    /// Create unsupported value error
    pub fn unsupported(
        component_id: impl Into<String>,
        member: impl Into<String>,
        shape: impl Into<String>,
    ) -> Self {
        Self::UnsupportedValue {
            component_id: component_id.into(),
            member: member.into(),
            shape: shape.into(),
        }
    }
}

/// Result type alias for translation
pub type TranslateResult<T> = Result<T, TranslateError>;
