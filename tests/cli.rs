//! コマンドラインインターフェースの統合テスト

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wspace() -> Command {
    let mut cmd = Command::cargo_bin("wspace").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn test_help_exits_zero_and_lists_commands() {
    wspace()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_short_help_exits_zero() {
    wspace().arg("-h").assert().success();
}

#[test]
fn test_missing_subcommand_prints_usage_and_fails() {
    Command::cargo_bin("wspace")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    wspace().arg("frobnicate").assert().failure();
}

#[test]
fn test_new_requires_a_name() {
    wspace()
        .arg("new")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn test_list_outside_a_project_reports_error() {
    let dir = TempDir::new().unwrap();
    wspace()
        .arg("list")
        .arg("-C")
        .arg(dir.path())
        .env("WSPACE_GIT", "wspace-no-such-git")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_invalid_workspace_name_fails_before_touching_git() {
    let dir = TempDir::new().unwrap();
    wspace()
        .args(["new", "../escape"])
        .arg("-C")
        .arg(dir.path())
        .env("WSPACE_GIT", "wspace-no-such-git")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}
