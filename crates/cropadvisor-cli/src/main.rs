//! Crop Advisor CLI - Command-line interface
//!
//! Interactive crop recommendation form over the built-in district catalog.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod form;
mod interactive;
mod output;
mod output_types;
mod render;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing; logs go to stderr so form output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast::<errors::CliError>() {
                Ok(cli_error) => cli_error.display(),
                Err(other) => errors::from_anyhow(other).display(),
            }
            ExitCode::FAILURE
        }
    }
}
