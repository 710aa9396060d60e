//! Resource locator
//!
//! Finds documents and manifests under a set of search roots. Paths are
//! matched relative to their root and returned sorted so runs are
//! reproducible regardless of directory iteration order. A file reachable
//! from several roots is returned once, under the first root that finds it.

use crate::config::GraftConfig;
use crate::error::{GraftError, LocateError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use graft_namespace::{Manifest, Resource};
use indexmap::IndexSet;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Glob-based file finder over search roots
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    roots: Vec<PathBuf>,
}

impl ResourceLocator {
    /// Create locator over `roots`
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Create locator over the configured search roots
    #[must_use]
    pub fn from_config(config: &GraftConfig) -> Self {
        Self::new(config.search_roots.iter().cloned())
    }

    /// Search roots
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Files matching any of `patterns`, sorted per root and deduplicated
    ///
    /// # Errors
    /// Returns error on a bad pattern, a missing root or a failed walk
    pub fn find(&self, patterns: &[String]) -> Result<Vec<PathBuf>, LocateError> {
        let globs = build_globset(patterns)?;
        let mut found = Vec::new();
        let mut seen = IndexSet::new();

        for root in &self.roots {
            if !root.is_dir() {
                return Err(LocateError::MissingRoot(root.clone()));
            }
            let mut matches = Vec::new();
            for entry in WalkDir::new(root).follow_links(true) {
                let entry = entry?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                if globs.is_match(relative) {
                    matches.push(entry.into_path());
                }
            }
            matches.sort();
            tracing::debug!("Found {} match(es) under {}", matches.len(), root.display());
            for path in matches {
                let key = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
                if seen.insert(key) {
                    found.push(path);
                }
            }
        }

        Ok(found)
    }

    /// Read every file matching `patterns`
    ///
    /// # Errors
    /// Returns error if locating fails or a file is unreadable
    pub fn resources(&self, patterns: &[String]) -> Result<Vec<Resource>, LocateError> {
        self.find(patterns)?
            .iter()
            .map(|path| Resource::read(path).map_err(LocateError::from))
            .collect()
    }

    /// Documents selected by `config`
    ///
    /// # Errors
    /// Returns error if locating fails or a document is unreadable
    pub fn documents(&self, config: &GraftConfig) -> Result<Vec<Resource>, LocateError> {
        self.resources(&config.effective_document_patterns())
    }

    /// Parse every manifest selected by `config`
    ///
    /// # Errors
    /// Returns error if locating fails or a manifest is unreadable or malformed
    pub fn manifests(&self, config: &GraftConfig) -> Result<Vec<Manifest>, GraftError> {
        let paths = self.find(&config.manifest_patterns)?;
        paths
            .iter()
            .map(|path| Manifest::load(path).map_err(GraftError::from))
            .collect()
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, LocateError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_DOCUMENT_PATTERN, DEFAULT_MANIFEST_PATTERN};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn display_relative(path: &Path, root: &Path) -> String {
        path.strip_prefix(root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn bundle() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for relative in [
            "b/OSGI-INF/blueprint/blueprint.xml",
            "a/OSGI-INF/blueprint/blueprint.xml",
            "a/OSGI-INF/blueprint/blueprint-ext.xml",
            "a/META-INF/blueprint.handlers",
            "a/OSGI-INF/blueprint/notes.txt",
        ] {
            let path = dir.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "<blueprint/>").unwrap();
        }
        fs::write(dir.path().join("a/META-INF/blueprint.handlers"), "ext\ncm\n").unwrap();
        dir
    }

    fn relative(dir: &TempDir, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| display_relative(p, dir.path()))
            .collect()
    }

    #[test]
    fn finds_primary_documents_sorted() {
        let dir = bundle();
        let config = GraftConfig::new().with_search_roots([dir.path()]);
        let locator = ResourceLocator::from_config(&config);

        let found = locator.find(&config.effective_document_patterns()).unwrap();
        assert_eq!(
            relative(&dir, &found),
            vec![
                "a/OSGI-INF/blueprint/blueprint.xml",
                "b/OSGI-INF/blueprint/blueprint.xml"
            ]
        );
    }

    #[test]
    fn overlapping_roots_report_each_file_once() {
        let dir = bundle();
        let locator = ResourceLocator::new([
            dir.path().join("b"),
            dir.path().to_path_buf(),
            dir.path().join("a"),
        ]);

        let found = locator
            .find(&[DEFAULT_DOCUMENT_PATTERN.to_string()])
            .unwrap();
        assert_eq!(
            relative(&dir, &found),
            vec![
                "b/OSGI-INF/blueprint/blueprint.xml",
                "a/OSGI-INF/blueprint/blueprint.xml"
            ]
        );
    }

    #[test]
    fn extra_documents_when_enabled() {
        let dir = bundle();
        let config = GraftConfig::new()
            .with_search_roots([dir.path()])
            .with_extra_documents(true);

        let documents = ResourceLocator::from_config(&config)
            .documents(&config)
            .unwrap();
        assert_eq!(documents.len(), 3);
    }

    #[test]
    fn manifests_are_parsed() {
        let dir = bundle();
        let config = GraftConfig::new().with_search_roots([dir.path()]);

        let manifests = ResourceLocator::from_config(&config)
            .manifests(&config)
            .unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].extension_ids().collect::<Vec<_>>(), vec!["ext", "cm"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let locator = ResourceLocator::new([dir.path().join("absent")]);
        let err = locator
            .find(&[DEFAULT_MANIFEST_PATTERN.to_string()])
            .unwrap_err();
        assert!(matches!(err, LocateError::MissingRoot(_)));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let locator = ResourceLocator::new([dir.path()]);
        let err = locator.find(&["a[".to_string()]).unwrap_err();
        assert!(matches!(err, LocateError::Pattern(_)));
    }
}
