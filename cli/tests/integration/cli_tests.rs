//! Integration tests for the applife CLI skeleton: help, version, global flags.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn applife(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("applife"));
    cmd.env("NO_COLOR", "1")
        .env("APPLIFE_CONFIG", config_dir.path().join("config.yaml"))
        .env_remove("APPLIFE_MAX_APPLICATIONS")
        .env_remove("APPLIFE_LOG_FILTER")
        .env_remove("RUST_LOG");
    cmd
}

fn isolated() -> (tempfile::TempDir, Command) {
    let dir = tempfile::tempdir().expect("tempdir");
    let cmd = applife(&dir);
    (dir, cmd)
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help() {
    let (_dir, mut cmd) = isolated();
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Usage: applife"));
}

#[test]
fn test_cli_help_flag_lists_commands() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_command_shows_version() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("applife v0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let (_dir, mut cmd) = isolated();
    let output = cmd.args(["version", "--json"]).output().expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_no_color_variable_is_accepted_and_disables_colors() {
    let (_dir, mut cmd) = isolated();
    cmd.env("NO_COLOR", "1")
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("applife v0.1.0"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_no_color_flag_still_parses() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--no-color", "version"]).assert().success();
}

#[test]
fn test_quiet_version_prints_nothing() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--quiet", "version"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_command_is_usage_error() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("launch").assert().code(2);
}

// --- Configuration errors ---

#[test]
fn test_malformed_config_file_fails_with_error() {
    let (dir, mut cmd) = isolated();
    std::fs::write(dir.path().join("config.yaml"), "max_applications: [oops\n").expect("write");
    cmd.arg("version")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_invalid_env_override_reports_json_error() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .env("APPLIFE_MAX_APPLICATIONS", "many")
        .args(["--json", "version"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "internal");
}
