//! `applife check`: validate serialized application revisions.
//!
//! Snapshots are deserialized without field validation, so this is where
//! `validate_business_rules` catches entities that never went through `create`.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::domain::Application;
use crate::infra::manifest::load_snapshot;
use crate::output::json::format_report;

/// Arguments for `applife check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Snapshot file (YAML or JSON) holding a list of application revisions
    pub snapshot: PathBuf,
}

/// Validation verdict for one revision.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckEntry {
    pub id: String,
    pub name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validate every revision, also flagging ids that appear more than once.
#[must_use]
pub fn check_entries(apps: &[Application]) -> Vec<CheckEntry> {
    let mut seen = HashSet::new();
    apps.iter()
        .map(|app| {
            let mut problems = Vec::new();
            if let Some(msg) = app.validate_business_rules().message() {
                problems.push(msg.to_string());
            }
            if !seen.insert(app.id().clone()) {
                problems.push(format!("duplicate id {}", app.id()));
            }
            CheckEntry {
                id: app.id().to_string(),
                name: app.name().to_string(),
                valid: problems.is_empty(),
                error: (!problems.is_empty()).then(|| problems.join("; ")),
            }
        })
        .collect()
}

/// Run `applife check`.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub fn run(app: &AppContext, args: &CheckArgs) -> Result<ExitCode> {
    let apps = load_snapshot(&args.snapshot)?;
    let entries = check_entries(&apps);
    let invalid = entries.iter().filter(|e| !e.valid).count();

    if app.is_json() {
        println!("{}", format_report(&entries)?);
    } else {
        for entry in &entries {
            match &entry.error {
                None => app.output.success(&format!("{} ({})", entry.name, entry.id)),
                Some(err) => app.output.error(&format!("{} ({}): {err}", entry.name, entry.id)),
            }
        }
        if invalid == 0 {
            app.output.info(&format!("{} revisions valid", entries.len()));
        }
    }

    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
