//! Output styles using owo-colors stylesheet pattern

use applife_common::AppStatus;
use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
#[derive(Default, Clone)]
pub struct Styles {
    /// Success messages (green)
    pub success: Style,
    /// Warning messages (yellow)
    pub warning: Style,
    /// Error messages (red)
    pub error: Style,
    /// Info messages (blue)
    pub info: Style,
    /// Dimmed/secondary text
    pub dim: Style,
    /// Headers/section titles
    pub header: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }

    /// Style for an application status label.
    #[must_use]
    pub fn status(&self, status: AppStatus) -> Style {
        match status {
            AppStatus::Running => self.success,
            AppStatus::Error => self.error,
            AppStatus::Starting | AppStatus::Stopping | AppStatus::Deploying => self.warning,
            AppStatus::Maintenance => self.info,
            AppStatus::Stopped => self.dim,
        }
    }
}
