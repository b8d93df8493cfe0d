//! # In-Memory Store
//!
//! Holds bookstore tables in process. Used by the router tests and for demos
//! without a database. Rows are kept ordered by primary key, matching the
//! ordering of [`PgStore`](super::PgStore).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::models::{Author, Book, Country, Customer, Language, Publisher, ShippingMethod};
use super::{Page, Store};

/// Row of the `book_author` mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookAuthor {
    pub book_id: i32,
    pub author_id: i32,
}

/// Contents of every table
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub authors: Vec<Author>,
    pub books: Vec<Book>,
    pub book_authors: Vec<BookAuthor>,
    pub customers: Vec<Customer>,
    pub publishers: Vec<Publisher>,
    pub countries: Vec<Country>,
    pub shipping_methods: Vec<ShippingMethod>,
    pub languages: Vec<Language>,
}

impl Tables {
    fn sort(&mut self) {
        self.authors.sort_by_key(|a| a.id);
        self.books.sort_by_key(|b| b.id);
        self.customers.sort_by_key(|c| c.id);
        self.publishers.sort_by_key(|p| p.id);
        self.countries.sort_by_key(|c| c.id);
        self.shipping_methods.sort_by_key(|s| s.id);
        self.languages.sort_by_key(|l| l.id);
    }
}

/// In-memory store
pub struct MemoryStore {
    tables: RwLock<Tables>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new(mut tables: Tables) -> Self {
        tables.sort();
        Self {
            tables: RwLock::new(tables),
            closed: AtomicBool::new(false),
        }
    }

    /// Close the store; subsequent queries fail with [`StoreError::Closed`]
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Run `f` against the tables unless the store is closed
    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> StoreResult<T> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&tables))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Tables::default())
    }
}

fn paginate<'a, T: Clone + 'a>(rows: impl Iterator<Item = &'a T>, page: Page) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    rows.skip(offset).take(limit).cloned().collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn authors(&self, page: Page) -> StoreResult<Vec<Author>> {
        self.read(|t| paginate(t.authors.iter(), page))
    }

    async fn authors_by(&self, term: &str, value: &str, page: Page) -> StoreResult<Vec<Author>> {
        match term {
            "name" => self.read(|t| {
                paginate(t.authors.iter().filter(|a| a.author_name == value), page)
            }),
            other => Err(StoreError::InvalidSearchTerm(other.to_string())),
        }
    }

    async fn books(&self, page: Page) -> StoreResult<Vec<Book>> {
        self.read(|t| paginate(t.books.iter(), page))
    }

    async fn books_by(&self, term: &str, value: &str, page: Page) -> StoreResult<Vec<Book>> {
        match term {
            "title" => self.read(|t| paginate(t.books.iter().filter(|b| b.title == value), page)),
            "isbn" => self.read(|t| paginate(t.books.iter().filter(|b| b.isbn == value), page)),
            "author" => self.read(|t| {
                let author_ids: Vec<i32> = t
                    .authors
                    .iter()
                    .filter(|a| a.author_name == value)
                    .map(|a| a.id)
                    .collect();
                let written = |book: &&Book| {
                    t.book_authors
                        .iter()
                        .any(|ba| ba.book_id == book.id && author_ids.contains(&ba.author_id))
                };
                paginate(t.books.iter().filter(written), page)
            }),
            other => Err(StoreError::InvalidSearchTerm(other.to_string())),
        }
    }

    async fn customers(&self, page: Page) -> StoreResult<Vec<Customer>> {
        self.read(|t| paginate(t.customers.iter(), page))
    }

    async fn customers_by(
        &self,
        term: &str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<Customer>> {
        match term {
            "email" => self.read(|t| paginate(t.customers.iter().filter(|c| c.email == value), page)),
            other => Err(StoreError::InvalidSearchTerm(other.to_string())),
        }
    }

    async fn publishers(&self, page: Page) -> StoreResult<Vec<Publisher>> {
        self.read(|t| paginate(t.publishers.iter(), page))
    }

    async fn countries(&self, page: Page) -> StoreResult<Vec<Country>> {
        self.read(|t| paginate(t.countries.iter(), page))
    }

    async fn shipping_methods(&self, page: Page) -> StoreResult<Vec<ShippingMethod>> {
        self.read(|t| paginate(t.shipping_methods.iter(), page))
    }

    async fn languages(&self, page: Page) -> StoreResult<Vec<Language>> {
        self.read(|t| paginate(t.languages.iter(), page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn author(id: i32, name: &str) -> Author {
        Author {
            id,
            author_name: name.to_string(),
        }
    }

    fn book(id: i32, title: &str) -> Book {
        Book {
            id,
            title: title.to_string(),
            isbn: format!("978{:010}", id),
            language_id: 1,
            num_pages: 100 + id,
            publication_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            publisher_id: 1,
        }
    }

    fn create_test_store() -> MemoryStore {
        MemoryStore::new(Tables {
            authors: vec![
                author(3, "Agatha Christie"),
                author(1, "Agatha Christie"),
                author(2, "William Shakespeare"),
            ],
            books: (1..=6).rev().map(|id| book(id, &format!("Book {}", id))).collect(),
            book_authors: vec![
                BookAuthor { book_id: 1, author_id: 1 },
                BookAuthor { book_id: 2, author_id: 2 },
                BookAuthor { book_id: 4, author_id: 3 },
                BookAuthor { book_id: 5, author_id: 1 },
            ],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_rows_ordered_by_id() {
        let store = create_test_store();
        let books = store.books(Page::new(100, 0)).await.unwrap();
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_pagination() {
        let store = create_test_store();

        let books = store.books(Page::new(2, 3)).await.unwrap();
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 5]);

        assert!(store.books(Page::new(10, 500)).await.unwrap().is_empty());
        assert!(store.books(Page::new(0, 0)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_books_by_author_includes_every_namesake() {
        let store = create_test_store();
        let books = store
            .books_by("author", "Agatha Christie", Page::new(100, 0))
            .await
            .unwrap();
        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 4, 5]);
    }

    #[tokio::test]
    async fn test_search_unknown_term() {
        let store = create_test_store();
        let err = store.books_by("foo", "bar", Page::new(10, 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidSearchTerm(_)));
    }

    #[tokio::test]
    async fn test_closed_store() {
        let store = create_test_store();
        store.close();

        let err = store.books(Page::new(10, 0)).await.unwrap_err();
        assert_eq!(err.to_string(), "conn closed");
        assert!(store.authors_by("name", "Agatha Christie", Page::new(10, 0)).await.is_err());
    }
}
