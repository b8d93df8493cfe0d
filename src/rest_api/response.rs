//! # Response Envelope
//!
//! Every `/v1` endpoint answers with the same shape:
//!
//! ```json
//! {"data": [...], "meta": {"timestamp": "..."}, "errors": [...]}
//! ```
//!
//! The HTTP status is taken from the first error, or 200 when there are none.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// RFC 3339 generation time
    pub timestamp: String,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// A single structured error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    /// Unique id for this occurrence
    pub id: String,
    /// HTTP status code applicable to the problem
    pub status: String,
    /// Application specific error code
    pub code: String,
    /// Short summary, the same for every occurrence
    pub title: String,
    /// Explanation specific to this occurrence
    pub detail: String,
}

impl EnvelopeError {
    /// Create an error with a fresh id
    pub fn new(
        status: StatusCode,
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            status: status.as_u16().to_string(),
            code: code.into(),
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Parsed status, if it is a valid HTTP code
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for EnvelopeError {}

/// Uniform response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: Vec<T>,
    pub meta: Meta,
    pub errors: Vec<EnvelopeError>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response
    pub fn data(data: Vec<T>) -> Self {
        Self {
            data,
            meta: Meta::now(),
            errors: Vec::new(),
        }
    }

    /// Failed response with empty data
    pub fn error(error: EnvelopeError) -> Self {
        Self::errors(vec![error])
    }

    /// Failed response carrying several errors
    pub fn errors(errors: Vec<EnvelopeError>) -> Self {
        Self {
            data: Vec::new(),
            meta: Meta::now(),
            errors,
        }
    }

    /// Status of the first error, else 200
    pub fn status_code(&self) -> StatusCode {
        self.errors
            .first()
            .and_then(EnvelopeError::status_code)
            .unwrap_or(StatusCode::OK)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}
