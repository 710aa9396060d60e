//! Translation report

use serde::{Deserialize, Serialize};

/// Component skipped after a translation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedComponent {
    /// Source component identifier
    pub component_id: String,

    /// Rendered error
    pub reason: String,
}

/// What happened to each enumerated component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationReport {
    /// Components registered into the target registry
    pub registered: Vec<String>,

    /// Components owned by the source runtime itself
    pub internal: Vec<String>,

    /// Components whose metadata is not bean-shaped
    pub not_bean: Vec<String>,

    /// Components skipped after an error
    pub failed: Vec<SkippedComponent>,
}

impl TranslationReport {
    /// Total components looked at
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.registered.len() + self.internal.len() + self.not_bean.len() + self.failed.len()
    }

    /// Check if every component was handled without error
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
