//! Integration tests for `applife check`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::applife;

const VALID: &str = "\
- id: app-0000000000000001
  name: billing
  host: 10.0.0.4
  port: 8080
  status: RUNNING
  version: 4
  created_at: 2026-01-01T00:00:00Z
  updated_at: 2026-01-02T00:00:00Z
";

#[test]
fn test_check_valid_snapshot_exits_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.yaml");
    std::fs::write(&path, VALID).expect("write");

    applife(&dir)
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("billing (app-0000000000000001)"));
}

#[test]
fn test_check_invalid_snapshot_reports_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");
    std::fs::write(
        &path,
        r#"[{"id":"app-2","name":"drop table users;","host":"bad host","port":80,
            "created_at":"2026-01-01T00:00:00Z","updated_at":"2026-01-01T00:00:00Z"}]"#,
    )
    .expect("write");

    let output = applife(&dir)
        .args(["check", "--json"])
        .arg(&path)
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(entries[0]["valid"], false);
    let error = entries[0]["error"].as_str().expect("error");
    assert!(error.contains("SQL"));
    assert!(error.contains("whitespace"));
}

#[test]
fn test_check_malformed_snapshot_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.yaml");
    std::fs::write(&path, "- id: app-1\n  name: svc\n").expect("write");

    applife(&dir)
        .arg("check")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse snapshot"));
}
