//! # Handler State

use std::sync::Arc;

use crate::store::Store;

use super::search::SearchRegistry;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Single shared store handle
    pub store: Arc<dyn Store>,
    /// Searchable entities by name
    pub searches: Arc<SearchRegistry>,
    /// Maximum and default page size
    pub response_size_limit: i64,
}

impl AppState {
    /// State with the bookstore search registry
    pub fn new(store: Arc<dyn Store>, response_size_limit: i64) -> Self {
        Self {
            store,
            searches: Arc::new(SearchRegistry::bookstore()),
            response_size_limit,
        }
    }
}
