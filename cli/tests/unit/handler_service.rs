//! Unit tests for `ApplicationHandler`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use applife::application::ApplicationHandler;
use applife::domain::{FailureKind, Metrics, Outcome};
use applife_common::{AppStatus, CreateAppRequest, Operation};
use serde_json::json;

use crate::helpers::{ExhaustedIds, PanickingIds, TickingClock, epoch, handler};

#[test]
fn test_create_builds_stopped_application() {
    let app = handler().create("billing", 8080, "10.0.0.4").into_value();

    assert_eq!(app.id().as_str(), "app-0000000000000001");
    assert_eq!(app.name(), "billing");
    assert_eq!(app.host(), "10.0.0.4");
    assert_eq!(app.port(), 8080);
    assert_eq!(app.status(), AppStatus::Stopped);
    assert_eq!(app.version(), 1);
    assert_eq!(app.created_at(), epoch());
    assert_eq!(app.url(), "http://10.0.0.4:8080");
}

#[test]
fn test_create_reports_every_invalid_field() {
    let outcome = handler().create("", 0, "");

    let failure = outcome.failure().expect("should fail");
    assert_eq!(failure.kind, FailureKind::Validation);
    assert!(failure.message.contains("name cannot be empty"));
    assert!(failure.message.contains("host cannot be empty"));
    assert!(failure.message.contains("Port must be between 1 and 65535"));
}

#[test]
fn test_create_rejects_reserved_and_markup_names() {
    let h = handler();
    assert_eq!(
        h.create("Admin", 8080, "localhost").message(),
        Some("name 'Admin' is reserved")
    );
    assert!(
        h.create("<script>alert(1)</script>", 8080, "localhost")
            .message()
            .expect("rejected")
            .contains("forbidden")
    );
}

#[test]
fn test_create_from_names_missing_fields() {
    let request = CreateAppRequest {
        name: Some("svc".into()),
        host: None,
        port: None,
    };
    let outcome = handler().create_from(&request);

    assert_eq!(
        outcome.message(),
        Some("host is required; port is required")
    );
}

#[test]
fn test_create_id_source_error_becomes_internal_failure() {
    let h = ApplicationHandler::new(ExhaustedIds, TickingClock::default());
    let failure = h.create("svc", 8080, "localhost").failure().cloned().expect("fails");

    assert_eq!(failure.kind, FailureKind::Internal);
    assert!(failure.message.contains("id pool exhausted"));
}

#[test]
fn test_create_panic_becomes_internal_failure() {
    let h = ApplicationHandler::new(PanickingIds, TickingClock::default());
    let failure = h.create("svc", 8080, "localhost").failure().cloned().expect("fails");

    assert_eq!(failure.kind, FailureKind::Internal);
    assert_eq!(failure.message, "id source blew up");
}

#[test]
fn test_start_then_stop_round_trip() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();

    let running = h.start(&created).into_value();
    assert!(running.is_running());
    assert_eq!(running.version(), 2);
    assert!(running.updated_at() > created.updated_at());

    let stopped = h.stop(&running).into_value();
    assert_eq!(stopped.status(), AppStatus::Stopped);
    assert_eq!(stopped.version(), 3);

    assert_eq!(created.status(), AppStatus::Stopped, "receiver untouched");
}

#[test]
fn test_double_start_and_double_stop_are_conflicts() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();
    let running = h.start(&created).into_value();

    let again = h.start(&running);
    assert_eq!(again.message(), Some("Application is already running"));
    assert_eq!(again.failure().map(|f| f.kind), Some(FailureKind::Conflict));

    assert_eq!(
        h.stop(&created).message(),
        Some("Application is already stopped")
    );
}

#[test]
fn test_restart_from_running_and_stopped() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();
    let running = h.start(&created).into_value();

    let restarted = h.restart(&running).into_value();
    assert!(restarted.is_running());
    assert_eq!(restarted.version(), running.version() + 2);

    assert_eq!(
        h.restart(&created).message(),
        Some("Application is already stopped")
    );
}

#[test]
fn test_invalid_entity_never_reaches_a_transition() {
    let snapshot: applife::domain::Application = serde_json::from_value(json!({
        "id": "app-1",
        "name": "root",
        "host": "localhost",
        "port": 8080,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }))
    .expect("deserializes without validation");

    let outcome = handler().start(&snapshot);
    assert_eq!(outcome.message(), Some("name 'root' is reserved"));
    assert_eq!(outcome.failure().map(|f| f.kind), Some(FailureKind::Validation));
}

#[test]
fn test_fail_records_reason_and_start_clears_it() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();
    let running = h.start(&created).into_value();

    let failed = h
        .apply(&running, &Operation::Fail { reason: "OOM".into() })
        .into_value();
    assert_eq!(failed.status(), AppStatus::Error);
    assert_eq!(failed.last_error(), Some("OOM"));
    assert!(!failed.is_healthy());

    let recovered = h.start(&failed).into_value();
    assert!(recovered.is_running());
    assert_eq!(recovered.last_error(), None);
}

#[test]
fn test_maintenance_blocks_start_until_exit() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();
    let maintenance = h.apply(&created, &Operation::EnterMaintenance).into_value();

    assert_eq!(
        h.start(&maintenance).message(),
        Some("cannot start application in status MAINTENANCE")
    );

    let back = h.apply(&maintenance, &Operation::ExitMaintenance).into_value();
    assert!(h.start(&back).is_success());
}

#[test]
fn test_failed_deploy_lands_in_error() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();
    let deploying = h.apply(&created, &Operation::BeginDeploy).into_value();
    assert_eq!(deploying.status(), AppStatus::Deploying);

    let done = h
        .apply(&deploying, &Operation::FinishDeploy { success: false })
        .into_value();
    assert_eq!(done.status(), AppStatus::Error);
    assert_eq!(done.last_error(), Some("deployment failed"));
}

#[test]
fn test_update_metrics_merges_keys() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();

    let mut first = Metrics::new();
    first.insert("rps".into(), json!(10));
    first.insert("p99_ms".into(), json!(120));
    let once = h.update_metrics(&created, first).into_value();

    let mut second = Metrics::new();
    second.insert("rps".into(), json!(12));
    let twice = h.update_metrics(&once, second).into_value();

    assert_eq!(twice.metrics().get("rps"), Some(&json!(12)));
    assert_eq!(twice.metrics().get("p99_ms"), Some(&json!(120)));
    assert_eq!(twice.version(), 3);
    assert_eq!(twice.status(), AppStatus::Stopped);
}

#[test]
fn test_outcome_chain_short_circuits_on_first_failure() {
    let h = handler();
    let created = h.create("svc", 8080, "localhost").into_value();

    let chained: Outcome<_> = h
        .stop(&created)
        .flat_map(|a| h.start(&a))
        .map(|a| a.version());
    assert_eq!(chained.message(), Some("Application is already stopped"));
}

#[test]
fn test_exhausted_revision_counter_is_a_failure_not_a_panic() {
    let snapshot: applife::domain::Application = serde_json::from_value(json!({
        "id": "app-1",
        "name": "svc",
        "host": "localhost",
        "port": 8080,
        "version": u64::MAX,
        "created_at": "2026-01-01T00:00:00Z",
        "updated_at": "2026-01-01T00:00:00Z"
    }))
    .expect("deserializes");

    let h = handler();
    for outcome in [h.start(&snapshot), h.update_metrics(&snapshot, Metrics::new())] {
        let failure = outcome.failure().cloned().expect("refused");
        assert_eq!(failure.kind, FailureKind::Internal);
        assert_eq!(failure.message, "Application app-1 has no revision numbers left");
    }
}
