#![forbid(unsafe_code)]

//! Typed rule inputs built from Ansible YAML

mod lintable;
mod play;
mod task;

pub use lintable::{Lintable, detect_kind};
pub use play::PlaybookNode;
pub use task::{RAW_PARAMS, TaskNode, parse_free_form};
