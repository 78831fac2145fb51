#![forbid(unsafe_code)]

//! Loading YAML files into rule inputs
//!
//! A `Lintable` is one file: its detected kind, the plays it declares and the
//! flattened list of tasks found in it.

use crate::error::PlaybookError;
use crate::playbook::{PlaybookNode, TaskNode};
use crate::types::FileKind;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Play sections that hold tasks, in execution order
const PLAY_TASK_SECTIONS: &[&str] = &["pre_tasks", "tasks", "post_tasks", "handlers"];

/// Block sections that hold nested tasks
const BLOCK_SECTIONS: &[&str] = &["block", "rescue", "always"];

/// Directories whose YAML files are never task lists
const NON_TASK_DIRS: &[&str] = &["vars", "defaults", "meta", "group_vars", "host_vars"];

/// File names that are never task lists
const NON_TASK_FILES: &[&str] = &[
    "requirements.yml",
    "requirements.yaml",
    "galaxy.yml",
    "galaxy.yaml",
];

/// A loaded YAML file ready for linting
#[derive(Debug, Clone)]
pub struct Lintable {
    pub path: PathBuf,
    pub kind: FileKind,
    pub content: String,
    pub plays: Vec<PlaybookNode>,
    pub tasks: Vec<TaskNode>,
}

impl Lintable {
    /// Read and parse a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlaybookError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PlaybookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, content)
    }

    /// Parse file content
    ///
    /// Task mappings that do not name a module are skipped, they are not
    /// errors for the file as a whole.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::Yaml` for invalid YAML and
    /// `PlaybookError::InvalidCollections` for a malformed `collections` key.
    pub fn parse(path: impl AsRef<Path>, content: impl Into<String>) -> Result<Self, PlaybookError> {
        let path = path.as_ref().to_path_buf();
        let content = content.into();

        let document: Value = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&content).map_err(|source| PlaybookError::Yaml {
                path: path.clone(),
                source,
            })?
        };

        let kind = detect_kind(&path, &document);
        let mut plays = Vec::new();
        let mut tasks = Vec::new();

        match (kind, &document) {
            (FileKind::Playbook, Value::Sequence(items)) => {
                let mut cursor = 0;
                for play in items.iter().filter_map(Value::as_mapping) {
                    if is_import_playbook(play) {
                        continue;
                    }
                    let mut node = PlaybookNode::from_play(kind, &path, play)?;
                    let line = node
                        .name
                        .as_deref()
                        .and_then(|name| locate_name(&content, name, cursor));
                    node.line = Some(line.unwrap_or(1));
                    plays.push(node);

                    let play_start = line.unwrap_or(cursor);
                    cursor = play_start;
                    for section in PLAY_TASK_SECTIONS {
                        if let Some(Value::Sequence(section_tasks)) = play.get(*section) {
                            let mut section_cursor = play_start;
                            collect_tasks(section_tasks, &content, &mut section_cursor, &mut tasks);
                            cursor = cursor.max(section_cursor);
                        }
                    }
                }
            }
            (FileKind::Tasks | FileKind::Handlers, Value::Sequence(items)) => {
                collect_tasks(items, &content, &mut 0, &mut tasks);
            }
            _ => {}
        }

        tracing::debug!(
            path = %path.display(),
            kind = %kind,
            plays = plays.len(),
            tasks = tasks.len(),
            "loaded lintable"
        );

        Ok(Self {
            path,
            kind,
            content,
            plays,
            tasks,
        })
    }
}

/// Detect the kind of a parsed document
pub fn detect_kind(path: &Path, document: &Value) -> FileKind {
    let Value::Sequence(items) = document else {
        return FileKind::Other;
    };

    let mappings: Vec<&Mapping> = items.iter().filter_map(Value::as_mapping).collect();
    if mappings.is_empty() {
        return FileKind::Other;
    }

    if mappings
        .iter()
        .any(|m| m.contains_key("hosts") || is_import_playbook(m))
    {
        return FileKind::Playbook;
    }

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if NON_TASK_FILES.contains(&file_name) {
        return FileKind::Other;
    }

    let dirs: Vec<&str> = path
        .parent()
        .map(|p| p.iter().filter_map(|c| c.to_str()).collect())
        .unwrap_or_default();
    if dirs.iter().any(|d| NON_TASK_DIRS.contains(d)) {
        return FileKind::Other;
    }
    if dirs.contains(&"handlers") {
        return FileKind::Handlers;
    }

    FileKind::Tasks
}

fn is_import_playbook(play: &Mapping) -> bool {
    play.contains_key("import_playbook") || play.contains_key("ansible.builtin.import_playbook")
}

/// Flatten tasks, descending into blocks
///
/// `cursor` is the last line already claimed by a name; each name is looked
/// up below it so repeated names resolve in document order.
fn collect_tasks(items: &[Value], content: &str, cursor: &mut u32, out: &mut Vec<TaskNode>) {
    for mapping in items.iter().filter_map(Value::as_mapping) {
        let is_block = BLOCK_SECTIONS
            .iter()
            .any(|s| matches!(mapping.get(*s), Some(Value::Sequence(_))));
        if is_block {
            let name = mapping.get("name").and_then(Value::as_str);
            if let Some(line) = name.and_then(|n| locate_name(content, n, *cursor)) {
                *cursor = line;
            }
            for section in BLOCK_SECTIONS {
                if let Some(Value::Sequence(nested)) = mapping.get(*section) {
                    collect_tasks(nested, content, cursor, out);
                }
            }
            continue;
        }

        match TaskNode::from_mapping(mapping) {
            Ok(mut task) => {
                task.line = task
                    .name
                    .as_deref()
                    .and_then(|n| locate_name(content, n, *cursor));
                if let Some(line) = task.line {
                    *cursor = line;
                }
                out.push(task);
            }
            Err(e) => tracing::debug!(error = %e, "skipping task"),
        }
    }
}

/// Find the first line after `after` declaring `name: <name>`
fn locate_name(content: &str, name: &str, after: u32) -> Option<u32> {
    content
        .lines()
        .enumerate()
        .skip(after as usize)
        .find_map(|(idx, line)| {
            let trimmed = line.trim_start().trim_start_matches("- ").trim_start();
            let value = trimmed.strip_prefix("name:")?.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (value == name).then_some(idx as u32 + 1)
        })
}
