//! # Store Errors

use thiserror::Error;

/// Result type for data-access operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Data-access errors. The message is passed through to API clients verbatim.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Search term outside the entity's allow-list
    #[error("invalid search term: {0}")]
    InvalidSearchTerm(String),

    /// The store handle was closed
    #[error("conn closed")]
    Closed,

    /// Connection string could not be parsed
    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// In-memory tables were poisoned by a panicking writer
    #[error("store lock poisoned")]
    Poisoned,

    /// Driver or query failure
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}
