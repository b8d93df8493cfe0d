//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use thiserror::Error;

use crate::config::ConfigError;
use crate::observability::ObservabilityError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("GRAVITY_CLI_CONFIG_ERROR: {0}")]
    Config(#[from] ConfigError),

    #[error("GRAVITY_CLI_LOGGING_ERROR: {0}")]
    Logging(#[from] ObservabilityError),

    #[error("GRAVITY_CLI_IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "GRAVITY_CLI_CONFIG_ERROR",
            CliError::Logging(_) => "GRAVITY_CLI_LOGGING_ERROR",
            CliError::Io(_) => "GRAVITY_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
