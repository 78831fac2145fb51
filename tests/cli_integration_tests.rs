//! End-to-end tests running the `playlint` binary
//!
//! Each test works in its own temporary directory via `current_dir`, so no
//! process-wide state is shared.

mod common;

use assert_cmd::Command;
use common::write_file;
use predicates::prelude::*;
use tempfile::TempDir;

fn playlint(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("playlint").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn jsonl_records(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_check_clean_human_output() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "site.yml", common::CLEAN_PLAYBOOK);

    playlint(&dir)
        .args(["--color", "never", "check"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Check PASSED"))
        .stdout(predicate::str::contains("Checked 1 file(s) with 2 rule(s)"));
}

#[test]
fn test_check_dirty_human_output() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "site.yml", common::DIRTY_PLAYBOOK);

    playlint(&dir)
        .args(["check", "site.yml", "--color", "never"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "site.yml:2: [VERY_HIGH] must_include_collections: Collection internal.collection.role needs to be included",
        ))
        .stdout(predicate::str::contains(
            "site.yml:5: [VERY_HIGH] email-address-validation: Email recipients must use an allowed domain: someone@gmail.com (task: Leak report)",
        ))
        .stdout(predicate::str::contains("Check FAILED"));
}

#[test]
fn test_check_jsonl_records() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "site.yml", common::DIRTY_PLAYBOOK);
    write_file(dir.path(), "broken.yml", "- hosts: [unclosed\n");

    let output = playlint(&dir)
        .args(["check", "--format", "jsonl"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let records = jsonl_records(&output);
    assert_eq!(records.len(), 4);

    assert_eq!(records[0]["type"], "finding");
    assert_eq!(records[0]["rule"], "must_include_collections");
    assert_eq!(records[1]["rule"], "email-address-validation");
    assert_eq!(records[1]["task"], "Leak report");
    assert_eq!(records[2]["type"], "error");
    assert!(
        records[2]["file"]
            .as_str()
            .is_some_and(|f| f.ends_with("broken.yml"))
    );

    let status = &records[3];
    assert_eq!(status["type"], "status");
    assert_eq!(status["passed"], false);
    assert_eq!(status["files_checked"], 2);
    assert_eq!(status["findings"], 2);
    assert_eq!(status["errors"], 1);
}

#[test]
fn test_config_output_format_applies() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "site.yml", common::CLEAN_PLAYBOOK);
    write_file(dir.path(), "playlint.toml", "[output]\nformat = \"jsonl\"\n");

    playlint(&dir)
        .arg("check")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(r#""type":"status""#));
}

#[test]
fn test_explicit_config_flag() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "site.yml", common::DIRTY_PLAYBOOK);
    write_file(
        dir.path(),
        "ci/strict.toml",
        "[rules]\nemail-address-validation = false\nmust_include_collections = false\n",
    );

    playlint(&dir)
        .args(["check", "--config", "ci/strict.toml"])
        .assert()
        .code(0);

    playlint(&dir)
        .args(["check", "--config", "ci/missing.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_parse_error_exit_code() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "playlint.toml", "[playlint\n");

    playlint(&dir)
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_list_jsonl() {
    let dir = TempDir::new().unwrap();

    let output = playlint(&dir)
        .args(["list", "--format", "jsonl"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let records = jsonl_records(&output);
    let ids: Vec<&str> = records
        .iter()
        .filter_map(|r| r["rule_id"].as_str())
        .collect();
    assert_eq!(ids, vec!["email-address-validation", "must_include_collections"]);
}

#[test]
fn test_list_uses_config_output_format() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "playlint.toml", "[output]\nformat = \"jsonl\"\n");

    let output = playlint(&dir)
        .arg("list")
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();
    assert_eq!(jsonl_records(&output).len(), 2);

    playlint(&dir)
        .args(["list", "--format", "human"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Rules (2 enabled)"));
}

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();

    playlint(&dir)
        .arg("init")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Created playlint.toml"));
    assert!(dir.path().join("playlint.toml").exists());

    playlint(&dir)
        .arg("init")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "site.yml", common::CLEAN_PLAYBOOK);

    playlint(&dir)
        .args(["check", "-v", "--format", "jsonl"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("loaded lintable"));
}
