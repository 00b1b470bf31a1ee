//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, `std::process`, or `std::net`, and never
//! logs. All functions are synchronous and take data in, returning data out.

pub mod application;
pub mod error;
pub mod outcome;
pub mod status;
pub mod validate;

pub use application::{AppId, Application, Metrics};
pub use error::{RegistryError, TransitionError, ValidationError};
pub use outcome::{Failure, FailureKind, Outcome};
