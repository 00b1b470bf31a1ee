//! applife - lifecycle management for web applications

use std::process::ExitCode;

use applife::cli::Cli;
use applife::output::json::format_error;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            match format_error(&format!("{e:#}"), "internal") {
                Ok(body) if json => println!("{body}"),
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
