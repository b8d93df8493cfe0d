//! # Bookstore Records
//!
//! Flat, read-only projections of the bookstore tables. Column aliases in the
//! SQL line up with the field names so `FromRow` can map rows directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `author` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i32,
    pub author_name: String,
}

impl Author {
    /// Query parameters accepted by the author search
    pub const SEARCH_TERMS: &'static [&'static str] = &["name"];
}

/// Row of the `book` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    pub language_id: i32,
    pub num_pages: i32,
    pub publication_date: NaiveDate,
    pub publisher_id: i32,
}

impl Book {
    /// Query parameters accepted by the book search
    pub const SEARCH_TERMS: &'static [&'static str] = &["title", "isbn", "author"];
}

/// Row of the `customer` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Customer {
    /// Query parameters accepted by the customer search
    pub const SEARCH_TERMS: &'static [&'static str] = &["email"];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: i32,
    pub publisher_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: i32,
    pub country_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    pub id: i32,
    pub method_name: String,
    pub cost: f64,
}

/// Row of the `book_language` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub id: i32,
    pub language_code: String,
    pub language_name: String,
}

/// A search hit from any searchable entity.
///
/// Serializes as the inner record so search responses look exactly like the
/// matching listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Author(Author),
    Book(Book),
    Customer(Customer),
}

impl From<Author> for Record {
    fn from(author: Author) -> Self {
        Record::Author(author)
    }
}

impl From<Book> for Record {
    fn from(book: Book) -> Self {
        Record::Book(book)
    }
}

impl From<Customer> for Record {
    fn from(customer: Customer) -> Self {
        Record::Customer(customer)
    }
}
