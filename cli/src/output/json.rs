//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed document to stdout.
//! Failures use the `{error, message, code}` object so adapters and scripts
//! can branch on `code`.

use anyhow::{Context, Result};
use applife_common::AppView;
use serde::Serialize;

use crate::domain::Failure;

/// Format an error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// One step of an `apply` run: the application addressed, what was done and
/// either the resulting view or the failure.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub app: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AppView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureReport>,
}

/// Serializable form of a [`Failure`].
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FailureReport {
    pub message: String,
    pub code: &'static str,
}

impl From<&Failure> for FailureReport {
    fn from(failure: &Failure) -> Self {
        Self {
            message: failure.message.clone(),
            code: failure.kind.code(),
        }
    }
}

/// Pretty-print any serializable report.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}
