//! # REST API Errors
//!
//! Error types for the search dispatcher.

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for search dispatch
pub type SearchResult<T> = Result<T, SearchError>;

/// Search dispatch errors
#[derive(Debug, Error)]
pub enum SearchError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// More than one non-pagination query parameter
    #[error("multiple search terms not supported")]
    MultipleSearchTerms,

    /// No recognized search term carried a value
    #[error("no valid search term / value found. valid search terms: [{}]", .0.join(" "))]
    NoValidSearchTerm(Vec<&'static str>),

    /// The lookup matched nothing
    #[error("no results found")]
    NoResults,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// The lookup failed in the store
    #[error("error retrieving by search: {0}")]
    Store(#[from] StoreError),

    /// No searchable entity registered under this name
    #[error("no search registered for entity: {0}")]
    UnknownEntity(String),
}

impl SearchError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::MultipleSearchTerms => StatusCode::BAD_REQUEST,
            SearchError::NoValidSearchTerm(_) => StatusCode::BAD_REQUEST,

            SearchError::NoResults => StatusCode::NOT_FOUND,

            SearchError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SearchError::UnknownEntity(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
