//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, or any I/O. Every error converts into an
//! [`Failure`](crate::domain::outcome::Failure) carrying its Display text.

use applife_common::AppStatus;
use thiserror::Error;

use crate::domain::outcome::{Failure, FailureKind};

// ── Validation errors ─────────────────────────────────────────────────────────

/// A field-level rule violated by an application's name, host or port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("name cannot be empty")]
    EmptyName,

    #[error("name must be at most {max} characters (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("name '{0}' is reserved")]
    ReservedName(String),

    #[error("name contains forbidden {0} content")]
    ForbiddenNameContent(&'static str),

    #[error("host cannot be empty")]
    EmptyHost,

    #[error("host '{0}' must not contain whitespace")]
    HostWhitespace(String),

    #[error("host must be at most {max} characters (got {len})")]
    HostTooLong { len: usize, max: usize },

    #[error("Port must be between 1 and 65535 (got {0})")]
    PortOutOfRange(i64),

    #[error("{}", join_messages(.0))]
    Multiple(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Collapse a list of violations: `None` when empty, the error itself when
    /// there is exactly one, `Multiple` otherwise.
    #[must_use]
    pub fn collect(mut errors: Vec<ValidationError>) -> Option<ValidationError> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ValidationError::Multiple(errors)),
        }
    }
}

// ── Transition errors ─────────────────────────────────────────────────────────

/// A lifecycle transition refused by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Application is already running")]
    AlreadyRunning,

    #[error("Application is already starting")]
    AlreadyStarting,

    #[error("Application is already stopped")]
    AlreadyStopped,

    #[error("Application is already stopping")]
    AlreadyStopping,

    #[error("cannot {operation} application in status {status}")]
    NotAllowed {
        operation: &'static str,
        status: AppStatus,
    },

    #[error("Application {id} has no revision numbers left")]
    VersionExhausted { id: String },
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors raised by the keyed application registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Application not found: {0}")]
    NotFound(String),

    #[error("Application {id} was modified concurrently; retry")]
    ConcurrentModification { id: String },

    #[error("registry is full ({limit} applications)")]
    CapacityReached { limit: usize },

    #[error("an application named '{0}' already exists")]
    DuplicateName(String),

    #[error("application id {0} is already registered")]
    DuplicateId(String),
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<ValidationError> for Failure {
    fn from(err: ValidationError) -> Self {
        Failure::new(FailureKind::Validation, err.to_string())
    }
}

impl From<TransitionError> for Failure {
    fn from(err: TransitionError) -> Self {
        let kind = match err {
            TransitionError::VersionExhausted { .. } => FailureKind::Internal,
            _ => FailureKind::Conflict,
        };
        Failure::new(kind, err.to_string())
    }
}

impl From<RegistryError> for Failure {
    fn from(err: RegistryError) -> Self {
        let kind = match err {
            RegistryError::NotFound(_) => FailureKind::NotFound,
            RegistryError::ConcurrentModification { .. }
            | RegistryError::DuplicateName(_)
            | RegistryError::DuplicateId(_) => FailureKind::Conflict,
            RegistryError::CapacityReached { .. } => FailureKind::Capacity,
        };
        Failure::new(kind, err.to_string())
    }
}
