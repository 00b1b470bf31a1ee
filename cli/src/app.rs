//! Application context: unified state passed to every command handler.
//!
//! Holds the output mode, the loaded configuration, and the wiring that turns
//! them into a registry backed by production ports.

use applife_common::RegistryConfig;

use crate::application::{ApplicationHandler, ApplicationRegistry};
use crate::infra::clock::SystemClock;
use crate::infra::ids::RandomIdGenerator;
use crate::output::{HumanRenderer, OutputContext};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags passed from the top-level CLI.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// The registry type the binary runs against.
pub type Registry = ApplicationRegistry<RandomIdGenerator, SystemClock>;

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Effective configuration (file + environment).
    pub config: RegistryConfig,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags and loaded config.
    #[must_use]
    pub fn new(flags: &OutputFlags, config: RegistryConfig) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn renderer(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }

    /// A fresh, empty registry wired to production ports.
    #[must_use]
    pub fn registry(&self) -> Registry {
        let handler = ApplicationHandler::new(RandomIdGenerator::new(), SystemClock);
        ApplicationRegistry::new(handler, self.config.clone())
    }
}
