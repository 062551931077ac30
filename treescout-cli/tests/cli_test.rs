use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let file_path = dir.path().join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(file_path, content)?;
    }
    Ok(())
}

/// Runs from inside `dir` so no stray local config is picked up
fn cli(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("treescout-cli")?;
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_find_prints_records() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(
        &temp_dir,
        &[
            ("a.txt", "hello world\n"),
            (".gitignore", "ignored/\n"),
            ("ignored/b.txt", "hello\n"),
        ],
    )?;

    cli(temp_dir.path())?
        .args(["find", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt:1:0: hello world\n"))
        .stdout(predicate::str::contains("b.txt").not());
    Ok(())
}

#[test]
fn test_find_symbols() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(
        &temp_dir,
        &[
            ("main.go", "package main\n\nfunc HelloWorld() {}\n"),
            ("notes.txt", "func HelloNotes() {}\n"),
        ],
    )?;

    cli(temp_dir.path())?
        .args(["find", "-s", "Hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main.go:3:5: HelloWorld"))
        .stdout(predicate::str::contains("HelloNotes").not());
    Ok(())
}

#[test]
fn test_find_json() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(&temp_dir, &[("a.txt", "say hello\n")])?;

    cli(temp_dir.path())?
        .args(["--json", "find", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"line\": 1"))
        .stdout(predicate::str::contains("\"column\": 4"))
        .stdout(predicate::str::contains("\"matched_text\": \"say hello\""));
    Ok(())
}

#[test]
fn test_find_with_explicit_dir() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(&temp_dir, &[("sub/a.txt", "needle\n"), ("b.txt", "needle\n")])?;

    let assert = cli(temp_dir.path())?
        .args(["find", "needle", "sub"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("sub"));
    Ok(())
}

#[test]
fn test_invalid_pattern_fails() -> Result<()> {
    let temp_dir = tempdir()?;

    cli(temp_dir.path())?
        .args(["find", "[invalid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid pattern"));
    Ok(())
}

#[test]
fn test_missing_dir_fails() -> Result<()> {
    let temp_dir = tempdir()?;

    cli(temp_dir.path())?
        .args(["find", "x", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory does not exist"));
    Ok(())
}

#[test]
fn test_glob_files_and_dirs() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(
        &temp_dir,
        &[("src/main.go", "package main\n"), ("src/util/a.go", "package util\n")],
    )?;

    cli(temp_dir.path())?
        .args(["glob", r"\.go$"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main.go"))
        .stdout(predicate::str::contains("a.go"));

    cli(temp_dir.path())?
        .args(["glob", "-d", "util"])
        .assert()
        .success()
        .stdout(predicate::str::contains("util\n"))
        .stdout(predicate::str::contains(".go").not());
    Ok(())
}

#[test]
fn test_replace_rewrites_and_reports() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(&temp_dir, &[("a.txt", "hello world\nbye\n")])?;

    cli(temp_dir.path())?
        .args(["replace", "hello", "goodbye"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- hello world"))
        .stdout(predicate::str::contains("+ goodbye world"))
        .stdout(predicate::str::contains("Changed 1 lines in 1 files"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.txt"))?,
        "goodbye world\nbye\n"
    );
    Ok(())
}

#[test]
fn test_replace_without_matches() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(&temp_dir, &[("a.txt", "hello\n")])?;

    cli(temp_dir.path())?
        .args(["replace", "absent", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made"));
    Ok(())
}

#[test]
fn test_rename_symbol() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(
        &temp_dir,
        &[(
            "test.go",
            "package main\n\nfunc oldName() {}\n\nfunc main() {\n\toldName()\n\toldName2()\n}\n",
        )],
    )?;

    cli(temp_dir.path())?
        .args(["rename", "oldName", "newName"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changed 2 lines in 1 files"));

    let content = fs::read_to_string(temp_dir.path().join("test.go"))?;
    assert!(content.contains("func newName() {}"));
    assert!(content.contains("\tnewName()\n"));
    assert!(content.contains("\toldName2()\n"));
    Ok(())
}

#[test]
fn test_ignore_flag_and_config_file() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(
        &temp_dir,
        &[
            ("keep/a.txt", "needle\n"),
            ("flagged/b.txt", "needle\n"),
            ("configured/c.txt", "needle\n"),
            ("scout.yaml", "extra_ignore_patterns:\n  - \"configured/\"\n"),
        ],
    )?;

    cli(temp_dir.path())?
        .args(["--config", "scout.yaml", "--ignore", "flagged/", "find", "needle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt").not())
        .stdout(predicate::str::contains("c.txt").not());
    Ok(())
}

#[test]
fn test_cli_flags_override_config_file() -> Result<()> {
    let temp_dir = tempdir()?;
    create_test_files(
        &temp_dir,
        &[
            (".gitignore", "git_only/\n"),
            (".scoutignore", "scout_only/\n"),
            ("git_only/a.txt", "needle\n"),
            ("scout_only/b.txt", "needle\n"),
            (
                "scout.yaml",
                "ignore_file: \".scoutignore\"\nlog_level: \"debug\"\n",
            ),
        ],
    )?;

    // The config alone logs at debug and reads .scoutignore
    cli(temp_dir.path())?
        .args(["--config", "scout.yaml", "find", "needle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt").not())
        .stderr(predicate::str::contains("Effective configuration"));

    // Flags win even when they spell out the defaults
    cli(temp_dir.path())?
        .args([
            "--config",
            "scout.yaml",
            "--log-level",
            "warn",
            "--ignore-file",
            ".gitignore",
            "find",
            "needle",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("a.txt").not())
        .stderr(predicate::str::contains("Effective configuration").not());
    Ok(())
}

#[test]
fn test_missing_config_file_fails() -> Result<()> {
    let temp_dir = tempdir()?;

    cli(temp_dir.path())?
        .args(["--config", "nope.yaml", "find", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}
