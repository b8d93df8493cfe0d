//! Observability for the Gravity API
//!
//! Structured logging through `tracing`. Request logging is a tower-http
//! `TraceLayer` installed by the HTTP server; this module owns the global
//! subscriber and helpers for logging sensitive values.

mod logger;

pub use logger::{init_logging, redact_connection_string};

use thiserror::Error;

/// Observability error
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Filter directive could not be parsed
    #[error("invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    /// A global subscriber was already installed
    #[error("failed to install log subscriber: {0}")]
    Init(String),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
