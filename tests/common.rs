//! Test utilities for playlint integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// A playbook that satisfies both built-in rules
pub const CLEAN_PLAYBOOK: &str = r#"---
- name: Configure web servers
  hosts: web
  collections:
    - internal.collection.role
  tasks:
    - name: Notify operations
      community.general.mail:
        subject: Deployed
        to: ops@customer.com.au
        cc:
          - team@customer.com
"#;

/// A playbook violating both built-in rules
pub const DIRTY_PLAYBOOK: &str = r#"---
- name: Configure database
  hosts: db
  tasks:
    - name: Leak report
      mail:
        subject: Report
        to: someone@gmail.com
        bcc: audit@cust.com.au
"#;

/// Write `content` to `relative` under `root`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
