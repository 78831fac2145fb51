#![forbid(unsafe_code)]

//! Playbook nodes
//!
//! One node per play. Playbook-level rules receive the node together with the
//! kind of the file it came from, so they can ignore non-playbook content.

use crate::error::PlaybookError;
use crate::types::FileKind;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// A play as seen by playbook rules
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybookNode {
    /// Kind of the file the play was loaded from
    pub kind: FileKind,

    /// Source file
    pub path: PathBuf,

    /// Declared `collections`, in document order
    pub collections: Vec<String>,

    /// Play `name`, when present
    pub name: Option<String>,

    /// Source line (1-indexed), when it could be located
    pub line: Option<u32>,
}

impl PlaybookNode {
    /// Creates a node with no declared collections
    pub fn new(kind: FileKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            collections: Vec::new(),
            name: None,
            line: None,
        }
    }

    /// Sets the declared collections
    pub fn with_collections<I, S>(mut self, collections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = collections.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `collection` is declared by this play
    pub fn declares(&self, collection: &str) -> bool {
        self.collections.iter().any(|c| c == collection)
    }

    /// Builds a node from a play mapping
    ///
    /// A play without `collections` declares none.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::InvalidCollections` if `collections` is present
    /// but is not a list of strings.
    pub fn from_play(kind: FileKind, path: &Path, play: &Mapping) -> Result<Self, PlaybookError> {
        let collections = match play.get("collections") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or(PlaybookError::InvalidCollections)
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(PlaybookError::InvalidCollections),
        };

        Ok(Self {
            kind,
            path: path.to_path_buf(),
            collections,
            name: play.get("name").and_then(Value::as_str).map(str::to_string),
            line: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_from_play_reads_collections() {
        let node = PlaybookNode::from_play(
            FileKind::Playbook,
            Path::new("site.yml"),
            &play(
                r#"
name: Site
hosts: all
collections:
  - internal.collection.role
  - community.general
"#,
            ),
        )
        .unwrap();

        assert_eq!(node.collections.len(), 2);
        assert!(node.declares("internal.collection.role"));
        assert!(!node.declares("internal.collection"));
        assert_eq!(node.name.as_deref(), Some("Site"));
        assert_eq!(node.path, PathBuf::from("site.yml"));
    }

    #[test]
    fn test_from_play_without_collections() {
        let node =
            PlaybookNode::from_play(FileKind::Playbook, Path::new("a.yml"), &play("hosts: all"))
                .unwrap();
        assert!(node.collections.is_empty());
    }

    #[test]
    fn test_from_play_rejects_scalar_collections() {
        let result = PlaybookNode::from_play(
            FileKind::Playbook,
            Path::new("a.yml"),
            &play("hosts: all\ncollections: internal.collection.role"),
        );
        assert!(matches!(result, Err(PlaybookError::InvalidCollections)));
    }

    #[test]
    fn test_from_play_rejects_nested_values() {
        let result = PlaybookNode::from_play(
            FileKind::Playbook,
            Path::new("a.yml"),
            &play("hosts: all\ncollections:\n  - {name: x}"),
        );
        assert!(matches!(result, Err(PlaybookError::InvalidCollections)));
    }
}
