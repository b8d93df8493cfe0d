//! # Bookstore Store
//!
//! Read-only data access for the bookstore tables. Every operation is
//! paginated and every search binds its value as a parameter; search terms
//! outside an entity's allow-list are rejected before any query runs.
//!
//! Two implementations exist:
//! - [`PgStore`]: PostgreSQL through a single-connection sqlx pool
//! - [`MemoryStore`]: in-process tables, for tests and demos

pub mod errors;
pub mod memory;
pub mod models;
pub mod postgres;

pub use errors::{StoreError, StoreResult};
pub use memory::{BookAuthor, MemoryStore, Tables};
pub use models::{Author, Book, Country, Customer, Language, Publisher, Record, ShippingMethod};
pub use postgres::PgStore;

use async_trait::async_trait;

/// Effective `LIMIT`/`OFFSET` for a single request.
///
/// Both values are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Create a page, flooring negative values at zero
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.max(0),
            offset: offset.max(0),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// Data access for every bookstore entity
#[async_trait]
pub trait Store: Send + Sync {
    async fn authors(&self, page: Page) -> StoreResult<Vec<Author>>;

    /// Authors where `term` (one of [`Author::SEARCH_TERMS`]) equals `value`
    async fn authors_by(&self, term: &str, value: &str, page: Page) -> StoreResult<Vec<Author>>;

    async fn books(&self, page: Page) -> StoreResult<Vec<Book>>;

    /// Books where `term` (one of [`Book::SEARCH_TERMS`]) equals `value`.
    ///
    /// `author` matches on author name and includes books of every author
    /// carrying that name.
    async fn books_by(&self, term: &str, value: &str, page: Page) -> StoreResult<Vec<Book>>;

    async fn customers(&self, page: Page) -> StoreResult<Vec<Customer>>;

    /// Customers where `term` (one of [`Customer::SEARCH_TERMS`]) equals `value`
    async fn customers_by(&self, term: &str, value: &str, page: Page)
        -> StoreResult<Vec<Customer>>;

    async fn publishers(&self, page: Page) -> StoreResult<Vec<Publisher>>;

    async fn countries(&self, page: Page) -> StoreResult<Vec<Country>>;

    async fn shipping_methods(&self, page: Page) -> StoreResult<Vec<ShippingMethod>>;

    async fn languages(&self, page: Page) -> StoreResult<Vec<Language>>;
}
