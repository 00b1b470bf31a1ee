//! Human-readable terminal renderer.

use std::fmt::Write as _;

use owo_colors::OwoColorize as _;

use crate::domain::{Application, Failure};
use crate::output::OutputContext;

/// Renders applications and step results using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("applife v{version}"));
    }

    /// Render the result of one operation on one application.
    pub fn render_step(&self, app: &str, operation: &str, result: Result<&Application, &Failure>) {
        match result {
            Ok(next) => self.ctx.success(&format!(
                "{app}: {operation} → {} (v{})",
                next.status(),
                next.version()
            )),
            Err(failure) => self.ctx.error(&format!("{app}: {operation} failed: {failure}")),
        }
    }

    /// Render the application table.
    pub fn render_app_list(&self, apps: &[Application]) {
        if self.ctx.quiet {
            return;
        }
        if apps.is_empty() {
            self.ctx.info("No applications registered.");
            return;
        }
        self.ctx.header("Applications:");
        let width = apps.iter().map(|a| a.name().len()).max().unwrap_or(0);
        for app in apps {
            println!("{}", self.app_line(app, width));
        }
    }

    fn app_line(&self, app: &Application, width: usize) -> String {
        let status = app.status();
        let label = format!("{:<11}", status.as_str());
        let mut line = format!(
            "  {:<width$}  {}  {}  {}",
            app.name(),
            label.style(self.ctx.styles.status(status)),
            app.url(),
            app.id().as_str().style(self.ctx.styles.dim),
        );
        if let Some(reason) = app.last_error() {
            let _ = write!(line, "  ({reason})");
        }
        line
    }
}
