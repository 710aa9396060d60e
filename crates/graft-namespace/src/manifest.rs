//! Extension manifests
//!
//! A manifest is a properties-style file whose keys name extensions to
//! load; values are ignored. Supported syntax:
//! - `#` and `!` comment lines
//! - keys terminated by `=`, `:` or whitespace
//! - backslash escapes inside keys
//! - backslash line continuations, joined before the key is read

use crate::error::{ManifestError, NamespaceError};
use crate::resource::Resource;
use indexmap::IndexSet;
use std::path::Path;

/// Conventional location of extension manifests
pub const DEFAULT_MANIFEST_PATH: &str = "META-INF/blueprint.handlers";

/// Parsed extension manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    location: String,
    extension_ids: IndexSet<String>,
}

impl Manifest {
    /// Parse manifest resource
    ///
    /// # Errors
    /// Returns error if the resource is not UTF-8 or a key ends mid-escape
    pub fn parse(resource: &Resource) -> Result<Self, ManifestError> {
        let text = resource.text().ok_or_else(|| ManifestError::Encoding {
            location: resource.location().to_string(),
        })?;
        Self::parse_str(resource.location(), text)
    }

    /// Read and parse manifest file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, NamespaceError> {
        let resource = Resource::read(path)?;
        Ok(Self::parse(&resource)?)
    }

    /// Parse manifest text
    ///
    /// # Errors
    /// Returns error if a key ends mid-escape
    pub fn parse_str(location: impl Into<String>, text: &str) -> Result<Self, ManifestError> {
        let location = location.into();
        let mut extension_ids = IndexSet::new();
        let mut lines = text.lines().enumerate();

        while let Some((number, line)) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                let Some((_, next)) = lines.next() else {
                    break;
                };
                logical.pop();
                logical.push_str(next.trim_start());
            }

            let key = read_key(&logical).ok_or_else(|| ManifestError::DanglingEscape {
                location: location.clone(),
                line: number + 1,
            })?;
            if !key.is_empty() {
                extension_ids.insert(key);
            }
        }

        tracing::debug!("Manifest {} lists {} extension(s)", location, extension_ids.len());
        Ok(Self {
            location,
            extension_ids,
        })
    }

    /// Where the manifest came from
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Extension identifiers in file order, duplicates removed
    pub fn extension_ids(&self) -> impl Iterator<Item = &str> {
        self.extension_ids.iter().map(String::as_str)
    }

    /// Number of distinct extensions listed
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.extension_ids.len()
    }

    /// Check if manifest lists nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extension_ids.is_empty()
    }
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Key up to the first unescaped separator; `None` on a dangling escape
fn read_key(line: &str) -> Option<String> {
    let mut key = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('t') => key.push('\t'),
                Some('n') => key.push('\n'),
                Some('r') => key.push('\r'),
                Some(escaped) => key.push(escaped),
                None if key.is_empty() => return None,
                // continuation at end of input
                None => break,
            },
            '=' | ':' => break,
            c if c.is_whitespace() => break,
            c => key.push(c),
        }
    }
    Some(key)
}
