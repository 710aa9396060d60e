//! In-memory resources
//!
//! Documents and manifests are read once into memory; the scanner, the
//! manifest parser and the source runtime all consume the same bytes.

use crate::error::ResourceError;
use std::path::Path;

/// A named blob of bytes loaded from disk or supplied directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    location: String,
    bytes: Vec<u8>,
}

impl Resource {
    /// Create resource from bytes
    #[inline]
    #[must_use]
    pub fn from_bytes(location: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            location: location.into(),
            bytes: bytes.into(),
        }
    }

    /// Read resource from a file
    ///
    /// # Errors
    /// Returns error if the file cannot be read
    pub fn read(path: &Path) -> Result<Self, ResourceError> {
        let bytes = std::fs::read(path).map_err(|e| ResourceError::io_error(path, e))?;
        Ok(Self {
            location: path.display().to_string(),
            bytes,
        })
    }

    /// Where the resource came from
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Raw content
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content as UTF-8, if valid
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<a/>").unwrap();

        let resource = Resource::read(file.path()).unwrap();
        assert_eq!(resource.bytes(), b"<a/>");
        assert_eq!(resource.text(), Some("<a/>"));
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Resource::read(&dir.path().join("missing.xml")).unwrap_err();
        assert!(err.to_string().contains("missing.xml"));
    }
}
