//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::application::ConfigStore;
use crate::commands;
use crate::infra::config::LayeredConfigStore;
use crate::infra::logging;

/// Lifecycle management for web applications
#[derive(Parser)]
#[command(
    name = "applife",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honoured via the `NO_COLOR` variable)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register applications from a manifest and run its actions
    Apply(commands::apply::ApplyArgs),

    /// Validate a snapshot of application revisions
    Check(commands::check::CheckArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or an input file cannot be loaded.
    pub fn run(self) -> Result<ExitCode> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;

        let config = LayeredConfigStore::from_env().load()?;
        logging::init(&config.log_filter)?;
        tracing::debug!(?config, "configuration loaded");

        let app = AppContext::new(
            &OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        );

        match command {
            Command::Apply(args) => commands::apply::run(&app, &args),
            Command::Check(args) => commands::check::run(&app, &args),
            Command::Version => {
                commands::version::run(&app);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
