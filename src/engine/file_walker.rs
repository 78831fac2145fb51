//! File discovery and traversal with gitignore support
//!
//! This module provides gitignore-aware file walking with glob-based filtering.
//! Only files matching the include patterns (YAML by default) are yielded.

use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// File did not match include patterns
    NotIncluded,
    /// File matched an exclude pattern
    Excluded,
}

/// A discovered file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Iterator over discovered files
pub struct FileWalker {
    root: PathBuf,
    walker: ignore::Walk,
    include_set: Option<GlobSet>,
    exclude_set: GlobSet,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Root directory (or single file) to walk
    /// * `include` - Include patterns (empty means include all)
    /// * `exclude` - Exclude patterns (applied after include)
    pub fn new(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
    ) -> Result<Self, FileWalkerError> {
        let walker = WalkBuilder::new(root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true) // Respect .gitignore
            .build();

        let include_set = if include.is_empty() {
            None
        } else {
            Some(Self::build_globset(include)?)
        };

        // Always exclude .git directory, merging with user-provided excludes
        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push(GlobPattern::new("**/.git/**"));
        let exclude_set = Self::build_globset(&exclude_patterns)?;

        Ok(Self {
            root: root.to_path_buf(),
            walker,
            include_set,
            exclude_set,
        })
    }

    /// Builds a GlobSet from patterns
    fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_str()).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Path used for glob matching: relative to the walked root, without a
    /// leading `./`
    ///
    /// A root that is itself a file keeps its own path.
    fn match_path<'a>(root: &Path, path: &'a Path) -> &'a Path {
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => path,
        };
        relative.strip_prefix(".").unwrap_or(relative)
    }

    fn skip_reason(
        path: &Path,
        include_set: Option<&GlobSet>,
        exclude_set: &GlobSet,
    ) -> Option<SkipReason> {
        if include_set.is_some_and(|set| !set.is_match(path)) {
            return Some(SkipReason::NotIncluded);
        }
        if exclude_set.is_match(path) {
            return Some(SkipReason::Excluded);
        }
        None
    }

    /// Walks the directory tree and returns an iterator over matching files
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        let root = self.root;
        let include_set = self.include_set;
        let exclude_set = self.exclude_set;

        self.walker.filter_map(move |result| match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return None;
                }

                let path = entry.path();
                let rel = Self::match_path(&root, path);
                if let Some(reason) = Self::skip_reason(rel, include_set.as_ref(), &exclude_set) {
                    tracing::trace!(path = %path.display(), ?reason, "skipping file");
                    return None;
                }

                Some(Ok(FileEntry::new(path)))
            }
            Err(e) => Some(Err(FileWalkerError::Walk(e))),
        })
    }
}
