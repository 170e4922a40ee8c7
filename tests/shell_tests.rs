//! Integration tests for the line-oriented shell

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::timeline_cmd;

fn init(temp: &TempDir) {
    timeline_cmd().arg("init").arg(temp.path()).assert().success();
}

#[test]
fn test_shell_autosave_session() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    timeline_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin("date 2023-05-01\ntext hello\ndone\nlist\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon, May 1, 2023  hello"));

    // every keystroke is already on disk
    timeline_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon, May 1, 2023  hello"));
}

#[test]
fn test_shell_wheel_picks() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    timeline_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin(
            "wheel century 20\n\
             wheel year-tens 2\n\
             wheel year-ones 3\n\
             wheel month 5\n\
             text picked\n\
             done\n",
        )
        .assert()
        .success();

    timeline_cmd()
        .current_dir(temp.path())
        .args(["export", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[2023-05-01]\npicked\n"));
}

#[test]
fn test_shell_cancel_restores_entry() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    let output = timeline_cmd()
        .current_dir(temp.path())
        .args(["add", "--date", "2023-05-01", "original"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let id = stdout.trim().trim_start_matches("Added entry ").to_string();

    timeline_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin(format!("edit {}\ntext scratch\ndate 1999-12-31\ncancel\n", id))
        .assert()
        .success();

    timeline_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon, May 1, 2023  original"))
        .stdout(predicate::str::contains("scratch").not());
}

#[test]
fn test_shell_reports_bad_lines_and_continues() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    timeline_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin("date 2023-02-31x\nfly away\ntext still works\ndone\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error: "))
        .stdout(predicate::str::contains("still works"));
}

#[test]
fn test_shell_export_writes_into_working_directory() {
    let temp = TempDir::new().unwrap();
    init(&temp);

    timeline_cmd()
        .current_dir(temp.path())
        .arg("shell")
        .write_stdin("text hello\ndone\nexport\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));

    let content = fs::read_to_string(temp.path().join("timeline-export.txt")).unwrap();
    assert_eq!(content, "Timeline Export\n\n[1993-01-01]\nhello\n\n");
}
