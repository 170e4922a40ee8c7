//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::timeline_cmd;

#[test]
fn test_init_creates_layout() {
    let temp = TempDir::new().unwrap();

    timeline_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized timeline"));

    assert!(temp.path().join(".timeline").is_dir());

    let content = fs::read_to_string(temp.path().join(".timeline/config.toml")).unwrap();
    assert!(content.contains("autosave_on_input = true"));
    assert!(content.contains("date_formatting = \"locale-weekday\""));

    let entries = fs::read_to_string(temp.path().join(".timeline/timeline-entries.json")).unwrap();
    assert_eq!(entries.trim(), "[]");
}

#[test]
fn test_init_with_explicit_add_and_iso() {
    let temp = TempDir::new().unwrap();

    timeline_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--explicit-add")
        .arg("--date-formatting")
        .arg("iso")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join(".timeline/config.toml")).unwrap();
    assert!(content.contains("autosave_on_input = false"));
    assert!(content.contains("date_formatting = \"iso\""));
}

#[test]
fn test_init_rejects_unknown_date_formatting() {
    let temp = TempDir::new().unwrap();

    timeline_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--date-formatting")
        .arg("roman")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date formatting"));

    assert!(!temp.path().join(".timeline").exists());
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();
    timeline_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_command_outside_timeline_fails() {
    let temp = TempDir::new().unwrap();

    timeline_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not a timeline directory"));
}

#[test]
fn test_timeline_root_env_var() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(elsewhere.path())
        .env("TIMELINE_ROOT", temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn test_discovery_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(&nested)
        .arg("list")
        .assert()
        .success();
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "date_formatting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("locale-weekday"));

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "date_formatting", "iso"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set date_formatting = iso"));

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "date_formatting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iso"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("autosave_on_input = true"))
        .stdout(predicate::str::contains("default_theme = light"))
        .stdout(predicate::str::contains("log_level = info"));
}

#[test]
fn test_config_invalid_key() {
    let temp = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "editor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_invalid_bool() {
    let temp = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "allow_read_only", "maybe"])
        .assert()
        .failure();
}

#[test]
fn test_config_rejects_unknown_log_level() {
    let temp = TempDir::new().unwrap();

    timeline_cmd().arg("init").arg(temp.path()).assert().success();

    timeline_cmd()
        .current_dir(temp.path())
        .args(["config", "log_level", "verbose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported log level"));

    timeline_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("logging disabled").not());
}
