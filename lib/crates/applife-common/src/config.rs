use serde::{Deserialize, Serialize};

/// Settings consumed by the application registry.
///
/// Every field has a default so a partial YAML file (or none at all) yields a
/// usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Upper bound on live applications. `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_applications: Option<usize>,

    /// `tracing` filter directive used when `RUST_LOG` is unset (default: `warn`).
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_applications: None,
            log_filter: default_log_filter(),
        }
    }
}

impl RegistryConfig {
    /// Returns `true` when another application may be registered given `live`
    /// applications already present.
    #[must_use]
    pub fn has_capacity_for(&self, live: usize) -> bool {
        self.max_applications.is_none_or(|limit| live < limit)
    }
}
