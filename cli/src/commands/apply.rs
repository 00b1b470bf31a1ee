//! `applife apply`: register a manifest's applications and run its actions.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use applife_common::AppView;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::domain::{Application, Outcome};
use crate::infra::manifest::load_manifest;
use crate::output::json::{FailureReport, StepReport, format_report};

/// Arguments for `applife apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Manifest file (YAML or JSON) listing `apps` and `actions`
    pub manifest: PathBuf,
}

#[derive(Serialize)]
struct ApplyReport {
    steps: Vec<StepReport>,
    applications: Vec<AppView>,
}

/// Run `applife apply`.
///
/// Every step runs even after a failure; the exit code reports whether any
/// step failed.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded.
pub fn run(app: &AppContext, args: &ApplyArgs) -> Result<ExitCode> {
    let manifest = load_manifest(&args.manifest)?;
    let registry = app.registry();
    let mut steps = Vec::new();

    for request in &manifest.apps {
        let label = request.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        let outcome = registry.create_app(request);
        steps.push(record(app, label, "create", &outcome));
    }

    for action in &manifest.actions {
        let outcome = registry
            .find_by_name(&action.app)
            .flat_map(|current| registry.apply_app(current.id(), &action.op));
        steps.push(record(app, action.app.clone(), action.op.verb(), &outcome));
    }

    let apps = registry.list_apps().into_result()?;
    let failed = steps.iter().any(|s| s.error.is_some());

    if app.is_json() {
        let report = ApplyReport {
            steps,
            applications: apps.iter().map(Application::view).collect(),
        };
        println!("{}", format_report(&report)?);
    } else {
        if !app.output.quiet {
            println!();
        }
        app.renderer().render_app_list(&apps);
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Print a human line for the step (unless in JSON mode) and return its report.
fn record(app: &AppContext, name: String, operation: &str, outcome: &Outcome<Application>) -> StepReport {
    if !app.is_json() {
        let result = match outcome {
            Outcome::Success(next) => Ok(next),
            Outcome::Failure(failure) => Err(failure),
        };
        app.renderer().render_step(&name, operation, result);
    }
    StepReport {
        app: name,
        operation: operation.to_string(),
        result: outcome.value().map(Application::view),
        error: outcome.failure().map(FailureReport::from),
    }
}
