//! Unit tests for applife
//!
//! These tests drive the handler and registry through deterministic ports
//! and run fast without external I/O.

mod handler_service;
mod helpers;
