//! # Pagination Resolver
//!
//! Computes the effective [`Page`] from `limit` and `offset` query parameters
//! and attaches it to the request before any handler runs.
//!
//! - `limit`: absent, unparseable, negative or above the maximum → maximum
//! - `offset`: absent, unparseable or negative → 0; no upper bound

use std::collections::HashMap;

use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::store::Page;

use super::state::AppState;

/// Query parameters consumed by pagination, never by search
pub const PAGINATION_PARAMS: [&str; 2] = ["limit", "offset"];

/// Resolve the page for a set of query parameters
pub fn resolve(params: &HashMap<String, String>, max_limit: i64) -> Page {
    let limit = params
        .get("limit")
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|limit| (0..=max_limit).contains(limit))
        .unwrap_or(max_limit);

    let offset = params
        .get("offset")
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|offset| *offset >= 0)
        .unwrap_or(0);

    Page::new(limit, offset)
}

/// Middleware storing the resolved [`Page`] in the request extensions
pub async fn resolve_page(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let params = Query::<HashMap<String, String>>::try_from_uri(req.uri())
        .map(|Query(params)| params)
        .unwrap_or_default();

    let page = resolve(&params, state.response_size_limit);
    req.extensions_mut().insert(page);
    next.run(req).await
}
