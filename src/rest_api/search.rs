//! # Search Dispatch
//!
//! Maps a single recognized query parameter onto an entity lookup.
//!
//! Each searchable entity implements [`Searchable`], exposing its allow-list
//! of search terms. The [`SearchRegistry`] selects the implementation by
//! entity name at runtime and applies the same validation to all of them:
//!
//! 1. More than one non-pagination parameter is rejected
//! 2. The first allow-listed term carrying a non-empty value is used
//! 3. An empty result is reported as not found

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::store::{Author, Book, Customer, Page, Record, Store, StoreResult};

use super::errors::{SearchError, SearchResult};
use super::pagination::PAGINATION_PARAMS;

/// An entity that can be looked up by one of a fixed set of fields
#[async_trait]
pub trait Searchable: Send + Sync {
    /// Name the registry keys on
    fn entity(&self) -> &'static str;

    /// Allow-listed search terms, in the order they are examined
    fn search_terms(&self) -> &'static [&'static str];

    /// Run the lookup for one allow-listed term
    async fn search(
        &self,
        store: &dyn Store,
        term: &str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<Record>>;
}

pub struct AuthorSearch;

#[async_trait]
impl Searchable for AuthorSearch {
    fn entity(&self) -> &'static str {
        "authors"
    }

    fn search_terms(&self) -> &'static [&'static str] {
        Author::SEARCH_TERMS
    }

    async fn search(
        &self,
        store: &dyn Store,
        term: &str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<Record>> {
        let authors = store.authors_by(term, value, page).await?;
        Ok(authors.into_iter().map(Record::from).collect())
    }
}

pub struct BookSearch;

#[async_trait]
impl Searchable for BookSearch {
    fn entity(&self) -> &'static str {
        "books"
    }

    fn search_terms(&self) -> &'static [&'static str] {
        Book::SEARCH_TERMS
    }

    async fn search(
        &self,
        store: &dyn Store,
        term: &str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<Record>> {
        let books = store.books_by(term, value, page).await?;
        Ok(books.into_iter().map(Record::from).collect())
    }
}

pub struct CustomerSearch;

#[async_trait]
impl Searchable for CustomerSearch {
    fn entity(&self) -> &'static str {
        "customers"
    }

    fn search_terms(&self) -> &'static [&'static str] {
        Customer::SEARCH_TERMS
    }

    async fn search(
        &self,
        store: &dyn Store,
        term: &str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<Record>> {
        let customers = store.customers_by(term, value, page).await?;
        Ok(customers.into_iter().map(Record::from).collect())
    }
}

/// Searchable entities keyed by name
#[derive(Default)]
pub struct SearchRegistry {
    searches: HashMap<&'static str, Arc<dyn Searchable>>,
}

impl SearchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with authors, books and customers
    pub fn bookstore() -> Self {
        let mut registry = Self::new();
        registry.register(AuthorSearch);
        registry.register(BookSearch);
        registry.register(CustomerSearch);
        registry
    }

    /// Register a searchable entity, replacing any previous one of that name
    pub fn register<S: Searchable + 'static>(&mut self, search: S) {
        self.searches.insert(search.entity(), Arc::new(search));
    }

    pub fn get(&self, entity: &str) -> Option<&dyn Searchable> {
        self.searches.get(entity).map(|s| s.as_ref())
    }

    /// Registered entity names, sorted
    pub fn entities(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.searches.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Validate `params` and run the matching lookup for `entity`
    pub async fn dispatch(
        &self,
        entity: &str,
        store: &dyn Store,
        params: &HashMap<String, String>,
        page: Page,
    ) -> SearchResult<Vec<Record>> {
        let search = self
            .get(entity)
            .ok_or_else(|| SearchError::UnknownEntity(entity.to_string()))?;

        let term_count = params
            .keys()
            .filter(|key| !PAGINATION_PARAMS.contains(&key.as_str()))
            .count();
        if term_count > 1 {
            return Err(SearchError::MultipleSearchTerms);
        }

        for term in search.search_terms() {
            let Some(value) = params.get(*term).filter(|v| !v.is_empty()) else {
                continue;
            };

            tracing::debug!(entity, term, value = value.as_str(), "dispatching search");
            let results = search.search(store, term, value, page).await?;
            if results.is_empty() {
                return Err(SearchError::NoResults);
            }
            return Ok(results);
        }

        Err(SearchError::NoValidSearchTerm(search.search_terms().to_vec()))
    }
}
