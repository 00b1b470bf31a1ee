//! The managed application entity.
//!
//! An [`Application`] is an immutable revision: every transition consumes
//! nothing and returns a fresh value with `version` bumped by one. The
//! receiver is never modified.

use std::collections::BTreeMap;
use std::fmt;

use applife_common::{AppStatus, AppView, Operation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{TransitionError, ValidationError};
use crate::domain::outcome::Outcome;
use crate::domain::status;
use crate::domain::validate;

/// Open key/value bag merged (never replaced) on update.
pub type Metrics = BTreeMap<String, serde_json::Value>;

/// Stable application identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One revision of a managed web application.
///
/// `Deserialize` performs no validation: revisions loaded from snapshots or
/// built in bulk must go through [`Application::validate_business_rules`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    id: AppId,
    name: String,
    host: String,
    port: u16,
    #[serde(default)]
    status: AppStatus,
    #[serde(default = "first_version")]
    version: u64,
    #[serde(default)]
    metrics: Metrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn first_version() -> u64 {
    1
}

impl Application {
    /// Construct a new `STOPPED` application at version 1.
    ///
    /// Fails fast: no partially-valid application is ever returned.
    ///
    /// # Errors
    ///
    /// Returns every violated field rule (see [`validate::validate_fields`]).
    pub fn new(
        id: AppId,
        name: impl Into<String>,
        host: impl Into<String>,
        port: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let host = host.into();
        let port = validate::validate_fields(&name, &host, port)?;
        Ok(Self {
            id,
            name,
            host,
            port,
            status: AppStatus::Stopped,
            version: first_version(),
            metrics: Metrics::new(),
            last_error: None,
            created_at: now,
            updated_at: now,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn id(&self) -> &AppId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn status(&self) -> AppStatus {
        self.status
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Reason recorded by the last `fail` or unsuccessful deploy.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ── Derived properties ────────────────────────────────────────────────────

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == AppStatus::Running
    }

    /// Not failed and not in the middle of a start, stop or deploy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(
            self.status,
            AppStatus::Running | AppStatus::Stopped | AppStatus::Maintenance
        )
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        status::can_start(self.status)
    }

    #[must_use]
    pub fn can_stop(&self) -> bool {
        status::can_stop(self.status)
    }

    #[must_use]
    pub fn can_restart(&self) -> bool {
        status::can_restart(self.status)
    }

    /// `https` on port 443, `http` otherwise.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.port == 443 { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    /// The caller-visible projection of this revision.
    #[must_use]
    pub fn view(&self) -> AppView {
        AppView {
            id: self.id.to_string(),
            name: self.name.clone(),
            host: self.host.clone(),
            port: self.port,
            status: self.status,
            is_running: self.is_running(),
        }
    }

    // ── Validation ────────────────────────────────────────────────────────────

    /// Re-check the field rules against the current values.
    ///
    /// Uses the same rule functions as [`Application::new`], so both layers
    /// always agree.
    pub fn validate_business_rules(&self) -> Outcome<()> {
        let mut errors = Vec::new();
        if let Err(e) = validate::validate_name(&self.name) {
            errors.push(e);
        }
        if let Err(e) = validate::validate_host(&self.host) {
            errors.push(e);
        }
        if let Err(e) = validate::validate_port(i64::from(self.port)) {
            errors.push(e);
        }
        match ValidationError::collect(errors) {
            None => Outcome::ok(()),
            Some(err) => Outcome::from_error(err),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Apply any lifecycle operation, returning the next revision.
    pub fn apply(&self, op: &Operation, now: DateTime<Utc>) -> Outcome<Application> {
        match op {
            Operation::Restart => self.restart(now),
            _ => Outcome::from(status::next_status(self.status, op))
                .flat_map(|next| self.transitioned(next, op, now)),
        }
    }

    /// STOPPED / ERROR / STOPPING → RUNNING.
    pub fn start(&self, now: DateTime<Utc>) -> Outcome<Application> {
        self.apply(&Operation::Start, now)
    }

    /// RUNNING / STARTING / ERROR → STOPPED.
    pub fn stop(&self, now: DateTime<Utc>) -> Outcome<Application> {
        self.apply(&Operation::Stop, now)
    }

    /// `stop` then `start`, returning the first failure.
    pub fn restart(&self, now: DateTime<Utc>) -> Outcome<Application> {
        self.stop(now).flat_map(|stopped| stopped.start(now))
    }

    /// New revision with `incoming` merged over the current metrics.
    pub fn with_metrics(&self, incoming: Metrics, now: DateTime<Utc>) -> Outcome<Application> {
        self.revise(now).map(|mut next| {
            next.metrics.extend(incoming);
            next
        })
    }

    fn transitioned(&self, next: AppStatus, op: &Operation, now: DateTime<Utc>) -> Outcome<Application> {
        self.revise(now).map(|revision| revision.with_status(next, op))
    }

    fn with_status(mut self, next: AppStatus, op: &Operation) -> Application {
        self.status = next;
        match op {
            Operation::Start => self.last_error = None,
            Operation::Fail { reason } => self.last_error = Some(reason.clone()),
            Operation::FinishDeploy { success: false } => {
                self.last_error = Some("deployment failed".to_string());
            }
            _ => {}
        }
        self
    }

    /// Copy with `version` bumped; refuses rather than wrapping at `u64::MAX`.
    fn revise(&self, now: DateTime<Utc>) -> Outcome<Application> {
        match self.version.checked_add(1) {
            Some(version) => Outcome::ok(Application {
                version,
                updated_at: now,
                ..self.clone()
            }),
            None => Outcome::from_error(TransitionError::VersionExhausted {
                id: self.id.to_string(),
            }),
        }
    }
}
