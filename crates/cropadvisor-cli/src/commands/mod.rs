//! Command implementations

mod advise;
mod config;
mod districts;

use crate::cli::{AdviseArgs, Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Advise(args)) => advise::execute(args, &output, config_path),
        None => advise::execute(AdviseArgs::default(), &output, config_path),
        Some(Commands::Districts) => districts::execute(&output),
        Some(Commands::Config) => config::execute(&output, config_path),
    }
}
