//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: configuration files and
//! environment, manifest loading, id generation, wall-clock time, and the
//! tracing subscriber.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod clock;
pub mod config;
pub mod ids;
pub mod logging;
pub mod manifest;
