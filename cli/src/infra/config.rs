//! Infrastructure implementation of the `ConfigStore` port.
//!
//! Layers, lowest precedence first:
//! 1. `RegistryConfig::default()`
//! 2. YAML file at `$APPLIFE_CONFIG`, else `~/.applife/config.yaml` (optional)
//! 3. `APPLIFE_MAX_APPLICATIONS` / `APPLIFE_LOG_FILTER` environment variables

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use applife_common::RegistryConfig;
use serde::Deserialize;

use crate::application::ports::ConfigStore;

pub const ENV_PREFIX: &str = "APPLIFE_";
pub const CONFIG_PATH_VAR: &str = "APPLIFE_CONFIG";

/// Environment overrides; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    max_applications: Option<usize>,
    log_filter: Option<String>,
}

/// Production `ConfigStore`: YAML file plus `APPLIFE_*` overrides.
pub struct LayeredConfigStore {
    path: Option<PathBuf>,
    vars: Vec<(String, String)>,
}

impl LayeredConfigStore {
    /// Snapshot the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            path: None,
            vars: std::env::vars().collect(),
        }
    }

    /// Explicit file path and variables (used in tests).
    #[must_use]
    pub fn with_sources(path: impl Into<PathBuf>, vars: Vec<(String, String)>) -> Self {
        Self {
            path: Some(path.into()),
            vars,
        }
    }

    fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl ConfigStore for LayeredConfigStore {
    fn load(&self) -> Result<RegistryConfig> {
        let path = self.path()?;
        let mut config = load_file(&path)?;

        let overrides: EnvOverrides = envy::prefixed(ENV_PREFIX)
            .from_iter(self.vars.iter().cloned())
            .context("invalid APPLIFE_* environment override")?;
        if let Some(limit) = overrides.max_applications {
            config.max_applications = Some(limit);
        }
        if let Some(filter) = overrides.log_filter {
            config.log_filter = filter;
        }
        Ok(config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Some(val) = self.var(CONFIG_PATH_VAR) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".applife").join("config.yaml"))
    }
}

fn load_file(path: &Path) -> Result<RegistryConfig> {
    if !path.exists() {
        return Ok(RegistryConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}
