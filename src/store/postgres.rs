//! # PostgreSQL Store
//!
//! sqlx-backed store over a pool capped at one connection. The pool connects
//! lazily, so an unreachable database or a rejected connection string
//! surfaces as a per-request error instead of a boot failure.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgRow, PgSslMode};
use sqlx::FromRow;

use super::errors::{StoreError, StoreResult};
use super::models::{Author, Book, Country, Customer, Language, Publisher, ShippingMethod};
use super::{Page, Store};

const ALL_AUTHORS: &str =
    "SELECT author_id AS id, author_name FROM author ORDER BY author_id LIMIT $1 OFFSET $2";

const AUTHORS_BY_NAME: &str = "SELECT author_id AS id, author_name FROM author \
     WHERE author_name = $1 ORDER BY author_id LIMIT $2 OFFSET $3";

const ALL_BOOKS: &str = "SELECT book_id AS id, title, isbn13 AS isbn, language_id, num_pages, \
     publication_date, publisher_id FROM book ORDER BY book_id LIMIT $1 OFFSET $2";

const BOOKS_BY_TITLE: &str = "SELECT book_id AS id, title, isbn13 AS isbn, language_id, num_pages, \
     publication_date, publisher_id FROM book \
     WHERE title = $1 ORDER BY book_id LIMIT $2 OFFSET $3";

const BOOKS_BY_ISBN: &str = "SELECT book_id AS id, title, isbn13 AS isbn, language_id, num_pages, \
     publication_date, publisher_id FROM book \
     WHERE isbn13 = $1 ORDER BY book_id LIMIT $2 OFFSET $3";

const BOOKS_BY_AUTHOR: &str = "SELECT book_id AS id, title, isbn13 AS isbn, language_id, num_pages, \
     publication_date, publisher_id FROM book \
     WHERE book_id IN (SELECT book_author.book_id FROM book_author \
     JOIN author ON author.author_id = book_author.author_id \
     WHERE author.author_name = $1) \
     ORDER BY book_id LIMIT $2 OFFSET $3";

const ALL_CUSTOMERS: &str = "SELECT customer_id AS id, first_name, last_name, email FROM customer \
     ORDER BY customer_id LIMIT $1 OFFSET $2";

const CUSTOMERS_BY_EMAIL: &str = "SELECT customer_id AS id, first_name, last_name, email \
     FROM customer WHERE email = $1 ORDER BY customer_id LIMIT $2 OFFSET $3";

const ALL_PUBLISHERS: &str = "SELECT publisher_id AS id, publisher_name FROM publisher \
     ORDER BY publisher_id LIMIT $1 OFFSET $2";

const ALL_COUNTRIES: &str =
    "SELECT country_id AS id, country_name FROM country ORDER BY country_id LIMIT $1 OFFSET $2";

// cost is NUMERIC in the schema
const ALL_SHIPPING_METHODS: &str = "SELECT method_id AS id, method_name, cost::float8 AS cost \
     FROM shipping_method ORDER BY method_id LIMIT $1 OFFSET $2";

const ALL_LANGUAGES: &str = "SELECT language_id AS id, language_code, language_name \
     FROM book_language ORDER BY language_id LIMIT $1 OFFSET $2";

/// Fixed query for an author search term
fn author_query(term: &str) -> StoreResult<&'static str> {
    match term {
        "name" => Ok(AUTHORS_BY_NAME),
        other => Err(StoreError::InvalidSearchTerm(other.to_string())),
    }
}

/// Fixed query for a book search term
fn book_query(term: &str) -> StoreResult<&'static str> {
    match term {
        "title" => Ok(BOOKS_BY_TITLE),
        "isbn" => Ok(BOOKS_BY_ISBN),
        "author" => Ok(BOOKS_BY_AUTHOR),
        other => Err(StoreError::InvalidSearchTerm(other.to_string())),
    }
}

/// Fixed query for a customer search term
fn customer_query(term: &str) -> StoreResult<&'static str> {
    match term {
        "email" => Ok(CUSTOMERS_BY_EMAIL),
        other => Err(StoreError::InvalidSearchTerm(other.to_string())),
    }
}

/// Upper bound on waiting for a connection from the pool
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Parse a connection string in URL (`postgres://...`) or libpq key/value
/// (`host=... user=...`) form.
///
/// An empty string yields the libpq environment defaults (`PGHOST`,
/// `PGUSER`, ...). Key/value pairs are applied on top of those defaults.
pub fn parse_connection_string(connection_string: &str) -> StoreResult<PgConnectOptions> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
        return Ok(PgConnectOptions::new());
    }
    if trimmed.contains("://") {
        return trimmed
            .parse::<PgConnectOptions>()
            .map_err(|e| StoreError::InvalidConnectionString(e.to_string()));
    }

    let mut options = PgConnectOptions::new();
    for pair in trimmed.split_whitespace() {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            StoreError::InvalidConnectionString(format!("missing '=' in '{}'", pair))
        })?;
        options = match key {
            "host" | "hostaddr" => options.host(value),
            "port" => options.port(value.parse().map_err(|_| {
                StoreError::InvalidConnectionString(format!("invalid port '{}'", value))
            })?),
            "user" => options.username(value),
            "password" => options.password(value),
            "dbname" => options.database(value),
            "sslmode" => options.ssl_mode(value.parse::<PgSslMode>().map_err(|e| {
                StoreError::InvalidConnectionString(e.to_string())
            })?),
            "application_name" => options.application_name(value),
            other => {
                return Err(StoreError::InvalidConnectionString(format!(
                    "unsupported key '{}'",
                    other
                )))
            }
        };
    }
    Ok(options)
}

enum Connection {
    Pool(PgPool),
    /// Connection string was rejected; every query fails with this reason
    Unusable(String),
}

/// PostgreSQL-backed store
pub struct PgStore {
    connection: Connection,
}

impl PgStore {
    /// Build a lazily connecting store.
    ///
    /// A connection string that cannot be parsed is logged and yields a
    /// store whose queries all fail. Must be called inside a tokio runtime.
    pub fn connect_lazy(connection_string: &str) -> Self {
        let connection = match parse_connection_string(connection_string) {
            Ok(options) => Connection::Pool(
                PgPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_lazy_with(options),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "database connection string rejected");
                Connection::Unusable(err.to_string())
            }
        };
        Self { connection }
    }

    /// True when the connection string was accepted
    pub fn is_configured(&self) -> bool {
        matches!(self.connection, Connection::Pool(_))
    }

    fn pool(&self) -> StoreResult<&PgPool> {
        match &self.connection {
            Connection::Pool(pool) => Ok(pool),
            Connection::Unusable(reason) => Err(StoreError::InvalidConnectionString(reason.clone())),
        }
    }

    /// Open the connection now and run a trivial query
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(self.pool()?).await?;
        Ok(())
    }

    /// Close the pool; subsequent queries fail
    pub async fn close(&self) {
        if let Connection::Pool(pool) = &self.connection {
            pool.close().await;
        }
    }

    async fn fetch_page<T>(&self, sql: &'static str, page: Page) -> StoreResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as::<_, T>(sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool()?)
            .await?;
        Ok(rows)
    }

    async fn fetch_matching<T>(
        &self,
        sql: &'static str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let rows = sqlx::query_as::<_, T>(sql)
            .bind(value)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool()?)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn authors(&self, page: Page) -> StoreResult<Vec<Author>> {
        self.fetch_page(ALL_AUTHORS, page).await
    }

    async fn authors_by(&self, term: &str, value: &str, page: Page) -> StoreResult<Vec<Author>> {
        let sql = author_query(term)?;
        self.fetch_matching(sql, value, page).await
    }

    async fn books(&self, page: Page) -> StoreResult<Vec<Book>> {
        self.fetch_page(ALL_BOOKS, page).await
    }

    async fn books_by(&self, term: &str, value: &str, page: Page) -> StoreResult<Vec<Book>> {
        let sql = book_query(term)?;
        tracing::debug!(term, value, limit = page.limit(), offset = page.offset(), "book search");
        self.fetch_matching(sql, value, page).await
    }

    async fn customers(&self, page: Page) -> StoreResult<Vec<Customer>> {
        self.fetch_page(ALL_CUSTOMERS, page).await
    }

    async fn customers_by(
        &self,
        term: &str,
        value: &str,
        page: Page,
    ) -> StoreResult<Vec<Customer>> {
        let sql = customer_query(term)?;
        self.fetch_matching(sql, value, page).await
    }

    async fn publishers(&self, page: Page) -> StoreResult<Vec<Publisher>> {
        self.fetch_page(ALL_PUBLISHERS, page).await
    }

    async fn countries(&self, page: Page) -> StoreResult<Vec<Country>> {
        self.fetch_page(ALL_COUNTRIES, page).await
    }

    async fn shipping_methods(&self, page: Page) -> StoreResult<Vec<ShippingMethod>> {
        self.fetch_page(ALL_SHIPPING_METHODS, page).await
    }

    async fn languages(&self, page: Page) -> StoreResult<Vec<Language>> {
        self.fetch_page(ALL_LANGUAGES, page).await
    }
}
