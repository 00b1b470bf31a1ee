use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a managed application.
///
/// `Maintenance` and `Deploying` belong to the extended lifecycle and never
/// take part in the start/stop transition tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppStatus {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
    Error,
    Maintenance,
    Deploying,
}

impl AppStatus {
    pub const ALL: [AppStatus; 7] = [
        AppStatus::Stopped,
        AppStatus::Starting,
        AppStatus::Running,
        AppStatus::Stopping,
        AppStatus::Error,
        AppStatus::Maintenance,
        AppStatus::Deploying,
    ];

    /// Wire name, e.g. `"RUNNING"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppStatus::Stopped => "STOPPED",
            AppStatus::Starting => "STARTING",
            AppStatus::Running => "RUNNING",
            AppStatus::Stopping => "STOPPING",
            AppStatus::Error => "ERROR",
            AppStatus::Maintenance => "MAINTENANCE",
            AppStatus::Deploying => "DEPLOYING",
        }
    }
}

impl fmt::Display for AppStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown application status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for AppStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A lifecycle operation an adapter may request on an application.
///
/// Serialized with an `op` tag so it can be embedded in request bodies and
/// manifest entries: `{"op": "fail", "reason": "OOM"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Start,
    Stop,
    Restart,
    BeginStart,
    BeginStop,
    Fail { reason: String },
    EnterMaintenance,
    ExitMaintenance,
    BeginDeploy,
    FinishDeploy { success: bool },
}

impl Operation {
    /// Short verb used in log lines and error messages.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Restart => "restart",
            Operation::BeginStart => "begin start",
            Operation::BeginStop => "begin stop",
            Operation::Fail { .. } => "fail",
            Operation::EnterMaintenance => "enter maintenance",
            Operation::ExitMaintenance => "exit maintenance",
            Operation::BeginDeploy => "begin deploy",
            Operation::FinishDeploy { .. } => "finish deploy",
        }
    }
}

/// Input accepted by `create`.
///
/// Fields are optional on the wire so that a missing field is reported by
/// name instead of failing deserialization as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAppRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub port: Option<i64>,
}

impl CreateAppRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: i64) -> Self {
        Self {
            name: Some(name.into()),
            host: Some(host.into()),
            port: Some(port),
        }
    }
}

/// The fields of an application a caller is allowed to read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppView {
    pub id: String,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub status: AppStatus,
    pub is_running: bool,
}
