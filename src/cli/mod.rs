//! CLI module for the Gravity API
//!
//! Provides command-line interface for:
//! - serve: Load configuration and serve HTTP
//! - routes: Print the route table

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{routes, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
