//! Rule execution engine and file discovery

pub mod executor;
pub mod file_walker;

pub use executor::{ExecutionEngine, ExecutionResult, LoadFailure, lint_with};
pub use file_walker::{FileEntry, FileWalker, FileWalkerError};
