//! Integration tests for the check, list and init commands
//!
//! NOTE: These tests change the current directory and use the serial_test attribute
//! to ensure they run sequentially and don't interfere with each other.

mod common;

use common::write_file;
use playlint::cli::check::run_check;
use playlint::cli::common::{EXIT_ERROR, EXIT_FINDINGS, EXIT_PARSE_ERROR, EXIT_SUCCESS};
use playlint::cli::init::{InitOutcome, run_init};
use playlint::cli::list::run_list;
use playlint::cli::{ColorChoice, OutputFormat};
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

/// Run `f` with the current directory set to a fresh temporary directory
fn in_temp_dir<F>(f: F)
where
    F: FnOnce(&Path),
{
    let temp_dir = TempDir::new().unwrap();
    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp_dir.path()).unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(temp_dir.path())));

    std::env::set_current_dir(original_dir).unwrap();
    if let Err(err) = result {
        std::panic::resume_unwind(err);
    }
}

fn check(paths: &[&str], format: OutputFormat) -> i32 {
    let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    run_check(&paths, Some(format), None, Some(ColorChoice::Never))
}

#[test]
#[serial]
fn test_check_clean_project_succeeds() {
    in_temp_dir(|root| {
        write_file(root, "site.yml", common::CLEAN_PLAYBOOK);
        assert_eq!(check(&["."], OutputFormat::Human), EXIT_SUCCESS);
    });
}

#[test]
#[serial]
fn test_check_findings_exit_code() {
    in_temp_dir(|root| {
        write_file(root, "site.yml", common::DIRTY_PLAYBOOK);
        assert_eq!(check(&["."], OutputFormat::Human), EXIT_FINDINGS);
        assert_eq!(check(&["site.yml"], OutputFormat::Jsonl), EXIT_FINDINGS);
    });
}

#[test]
#[serial]
fn test_check_without_config_uses_defaults() {
    in_temp_dir(|root| {
        write_file(
            root,
            "site.yml",
            "- hosts: all\n  collections: [internal.collection.role]\n",
        );
        assert!(!root.join("playlint.toml").exists());
        assert_eq!(check(&["."], OutputFormat::Jsonl), EXIT_SUCCESS);
    });
}

#[test]
#[serial]
fn test_check_respects_config_file() {
    in_temp_dir(|root| {
        write_file(root, "site.yml", common::DIRTY_PLAYBOOK);
        write_file(
            root,
            "playlint.toml",
            r#"
[rules]
must_include_collections = false
email-address-validation = { allowed_email_domains = ["gmail.com", "cust.com.au"] }
"#,
        );
        assert_eq!(check(&["."], OutputFormat::Human), EXIT_SUCCESS);
    });
}

#[test]
#[serial]
fn test_check_exclude_patterns() {
    in_temp_dir(|root| {
        write_file(root, "site.yml", common::CLEAN_PLAYBOOK);
        write_file(root, "molecule/default/converge.yml", common::DIRTY_PLAYBOOK);
        write_file(
            root,
            "playlint.toml",
            "[playlint]\nexclude = [\"**/molecule/**\"]\n",
        );
        assert_eq!(check(&["."], OutputFormat::Human), EXIT_SUCCESS);
    });
}

#[test]
#[serial]
fn test_check_root_relative_include() {
    in_temp_dir(|root| {
        write_file(root, "playbooks/site.yml", common::DIRTY_PLAYBOOK);
        write_file(root, "other/site.yml", common::DIRTY_PLAYBOOK);
        write_file(
            root,
            "playlint.toml",
            "[playlint]\ninclude = [\"playbooks/**\"]\n",
        );
        assert_eq!(check(&["."], OutputFormat::Jsonl), EXIT_FINDINGS);

        let abs = root.to_string_lossy().to_string();
        assert_eq!(check(&[abs.as_str()], OutputFormat::Jsonl), EXIT_FINDINGS);

        write_file(
            root,
            "playlint.toml",
            "[playlint]\ninclude = [\"other/**\"]\nexclude = [\"other/**\"]\n",
        );
        assert_eq!(check(&["."], OutputFormat::Jsonl), EXIT_SUCCESS);
    });
}

#[test]
#[serial]
fn test_check_config_errors() {
    in_temp_dir(|root| {
        write_file(root, "site.yml", common::CLEAN_PLAYBOOK);

        write_file(root, "playlint.toml", "[rules\n");
        assert_eq!(check(&["."], OutputFormat::Human), EXIT_PARSE_ERROR);

        write_file(root, "playlint.toml", "[rules]\nunknown-rule = true\n");
        assert_eq!(check(&["."], OutputFormat::Human), EXIT_ERROR);
    });
}

#[test]
#[serial]
fn test_check_unparsable_playbook_fails() {
    in_temp_dir(|root| {
        write_file(root, "site.yml", common::CLEAN_PLAYBOOK);
        write_file(root, "broken.yml", "- hosts: [unclosed\n");
        assert_eq!(check(&["."], OutputFormat::Jsonl), EXIT_FINDINGS);
    });
}

#[test]
#[serial]
fn test_init_then_list() {
    in_temp_dir(|root| {
        assert_eq!(run_init(false).unwrap(), InitOutcome::Created);
        assert!(root.join("playlint.toml").exists());
        assert_eq!(run_init(false).unwrap(), InitOutcome::Skipped);
        assert_eq!(run_init(true).unwrap(), InitOutcome::Overwritten);

        assert_eq!(run_list(Some(OutputFormat::Human), None), EXIT_SUCCESS);
        assert_eq!(run_list(Some(OutputFormat::Jsonl), None), EXIT_SUCCESS);
    });
}

#[test]
#[serial]
fn test_list_with_broken_config() {
    in_temp_dir(|root| {
        write_file(root, "playlint.toml", "not = [valid\n");
        assert_eq!(run_list(Some(OutputFormat::Human), None), EXIT_PARSE_ERROR);
    });
}
