use assert_cmd::Command;
use std::path::Path;

pub fn timeline_cmd() -> Command {
    let mut cmd = Command::cargo_bin("timeline").unwrap();
    cmd.env_remove("TIMELINE_ROOT");
    cmd.env_remove("TIMELINE_LOG");
    cmd
}

/// Run `timeline add` in `dir` and return the new entry's id
#[allow(dead_code)]
pub fn add_entry(dir: &Path, date: &str, text: &str) -> String {
    let output = timeline_cmd()
        .current_dir(dir)
        .args(["add", "--date", date, text])
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added entry ")
        .unwrap_or_else(|| panic!("unexpected add output: {}", stdout))
        .to_string()
}
