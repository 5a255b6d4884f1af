//! Tests for the `flakefix-bin` binary: files written, output and exit status.
#![allow(clippy::unwrap_used)]

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn flakefix(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("flakefix-bin")?;
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    Ok(cmd)
}

#[test]
fn test_fixes_files_from_saved_report() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("a.py"), "import os, sys\nx=sys.argv\n")?;
    fs::write(
        temp.path().join("report.txt"),
        "a.py:1:1:F401:'os' imported but unused\n\
         a.py:2:2:E225:missing whitespace around operator\n",
    )?;

    flakefix(&temp)?
        .args(["--report", "report.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixed: a.py (2 resolved)"));

    assert_eq!(
        fs::read_to_string(temp.path().join("a.py"))?,
        "import sys\nx =sys.argv\n"
    );
    Ok(())
}

#[test]
fn test_report_from_stdin() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("b.py"), "x = 1  #note\n")?;

    flakefix(&temp)?
        .args(["--report", "-"])
        .write_stdin("b.py:1:8:E262:inline comment should start with '# '\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("b.py"))?,
        "x = 1  # note\n"
    );
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("a.py"), "x=1\n")?;
    fs::write(
        temp.path().join("report.txt"),
        "a.py:1:2:E225:missing whitespace around operator\n",
    )?;

    flakefix(&temp)?
        .args(["--report", "report.txt", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would fix: a.py"));

    assert_eq!(fs::read_to_string(temp.path().join("a.py"))?, "x=1\n");
    Ok(())
}

#[test]
fn test_failed_file_exits_one_and_others_are_fixed() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("good.py"), "x=1\n")?;
    fs::write(temp.path().join("bad.py"), "import os\n")?;
    fs::write(
        temp.path().join("report.txt"),
        "good.py:1:2:E225:missing whitespace around operator\n\
         bad.py:1:1:F401:'json' imported but unused\n",
    )?;

    flakefix(&temp)?
        .args(["--report", "report.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed: bad.py"));

    assert_eq!(fs::read_to_string(temp.path().join("good.py"))?, "x =1\n");
    assert_eq!(fs::read_to_string(temp.path().join("bad.py"))?, "import os\n");
    Ok(())
}

#[test]
fn test_missing_report_exits_two() -> Result<()> {
    let temp = TempDir::new()?;
    flakefix(&temp)?
        .args(["--report", "missing.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn test_missing_analyzer_exits_two() -> Result<()> {
    let temp = TempDir::new()?;
    flakefix(&temp)?
        .args(["--analyzer", "flakefix-no-such-analyzer", "."])
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test_config_ignore_applies() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("a.py"), "x=1\n")?;
    fs::write(temp.path().join(".flakefix.toml"), "[flakefix]\nignore = [\"E225\"]\n")?;
    fs::write(
        temp.path().join("report.txt"),
        "a.py:1:2:E225:missing whitespace around operator\n",
    )?;

    flakefix(&temp)?
        .args(["--report", "report.txt", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remaining 1:2: E225"));

    assert_eq!(fs::read_to_string(temp.path().join("a.py"))?, "x=1\n");
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("a.py"), "import os\nx = 1\n")?;
    fs::write(
        temp.path().join("report.txt"),
        "a.py:1:1:F401:'os' imported but unused\n",
    )?;

    let output = flakefix(&temp)?
        .args(["--report", "report.txt", "--json"])
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["files"][0]["file"], "a.py");
    assert_eq!(value["files"][0]["status"], "fixed");
    assert_eq!(value["files"][0]["resolved"][0]["code"], "F401");
    assert_eq!(fs::read_to_string(temp.path().join("a.py"))?, "x = 1\n");
    Ok(())
}
