//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `applife_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use anyhow::Result;
use applife_common::RegistryConfig;
use chrono::{DateTime, Utc};

use crate::domain::AppId;

// ── Identity and Time Ports ───────────────────────────────────────────────────

/// Issues identifiers for newly created applications.
///
/// Implementations must never hand out the same id twice within a process.
pub trait IdGenerator: Send + Sync {
    /// Produce the next identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the id source is exhausted or unavailable. The
    /// handler reports it as an internal failure.
    fn next_id(&self) -> Result<AppId>;

    /// Forget an id whose application has been removed. Generators that keep
    /// no record of issued ids need not override this.
    fn release(&self, _id: &AppId) {}
}

/// Source of the timestamps stamped on every revision.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts configuration loading so commands can be tested without touching
/// the user's home directory or environment.
pub trait ConfigStore {
    /// Load the effective configuration (file, then environment overrides).
    ///
    /// # Errors
    ///
    /// Returns an error if a present config file cannot be read or parsed, or
    /// an override variable has an invalid value.
    fn load(&self) -> Result<RegistryConfig>;

    /// Path of the config file this store reads.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
