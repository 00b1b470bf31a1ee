//! Manifest and snapshot file loading.
//!
//! Both formats are YAML; JSON files parse too since JSON is a YAML subset.

use std::path::Path;

use anyhow::{Context, Result};
use applife_common::{CreateAppRequest, Operation};
use serde::Deserialize;

use crate::domain::Application;

/// A batch of applications to register and operations to run against them.
///
/// ```yaml
/// apps:
///   - { name: billing, host: 10.0.0.4, port: 8080 }
/// actions:
///   - { app: billing, op: start }
///   - { app: billing, op: fail, reason: OOM }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub apps: Vec<CreateAppRequest>,
    #[serde(default)]
    pub actions: Vec<ManifestAction>,
}

/// One operation addressed to an application by name.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ManifestAction {
    pub app: String,
    #[serde(flatten)]
    pub op: Operation,
}

/// Load and parse a manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid manifest.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read manifest {}", path.display()))?;
    parse_manifest(&content).with_context(|| format!("cannot parse manifest {}", path.display()))
}

/// Parse manifest text.
///
/// # Errors
///
/// Returns an error on malformed YAML or unknown operations.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load a list of serialized application revisions.
///
/// No field validation happens here; callers run
/// `Application::validate_business_rules` on each entry.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_snapshot(path: &Path) -> Result<Vec<Application>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read snapshot {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("cannot parse snapshot {}", path.display()))
}
