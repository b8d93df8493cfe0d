//! CLI argument definitions using clap
//!
//! Commands:
//! - gravity-api serve [--config <path>]
//! - gravity-api routes

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gravity API - read-only REST access to the Gravity bookstore dataset
#[derive(Parser, Debug)]
#[command(name = "gravity-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to the database and serve the API
    Serve {
        /// JSON profile file; defaults to gravity.local.json or gravity.docker.json
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print every registered route
    Routes,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
