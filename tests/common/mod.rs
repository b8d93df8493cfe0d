//! Shared fixtures for router tests
//!
//! A small bookstore: 200 books ordered by id, two authors named
//! "Agatha Christie" and a handful of rows in every other table.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use gravity_api::http_server::build_router;
use gravity_api::rest_api::AppState;
use gravity_api::store::{
    Author, Book, BookAuthor, Country, Customer, Language, MemoryStore, Publisher,
    ShippingMethod, Tables,
};

pub const BOOK_COUNT: i32 = 200;

fn book(id: i32, title: &str, isbn: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        isbn: isbn.to_string(),
        language_id: 1,
        num_pages: 150 + id,
        publication_date: NaiveDate::from_ymd_opt(1990 + id % 30, 1 + (id % 12) as u32, 1).unwrap(),
        publisher_id: 1 + id % 3,
    }
}

fn author(id: i32, name: &str) -> Author {
    Author {
        id,
        author_name: name.to_string(),
    }
}

pub fn fixture_tables() -> Tables {
    let mut books = vec![
        book(1, "They Do It With Mirrors", "9781559277587"),
        book(2, "The Tempest", "9780743482837"),
        book(
            3,
            "Hercule Poirot's Christmas: A BBC Radio 4 Full-Cast Dramatisation",
            "9780563510154",
        ),
        book(4, "The Hobbit", "9780618260300"),
    ];
    books.extend((5..=BOOK_COUNT).map(|id| {
        book(id, &format!("Catalogue Volume {}", id), &format!("978000{:07}", id))
    }));

    let mut book_authors = vec![
        BookAuthor { book_id: 1, author_id: 1 },
        BookAuthor { book_id: 2, author_id: 2 },
        BookAuthor { book_id: 3, author_id: 1 },
        BookAuthor { book_id: 4, author_id: 3 },
        BookAuthor { book_id: 21, author_id: 4 },
    ];
    book_authors.extend((10..=20).map(|book_id| BookAuthor { book_id, author_id: 1 }));

    Tables {
        authors: vec![
            author(1, "Agatha Christie"),
            author(2, "William Shakespeare"),
            author(3, "J.R.R. Tolkien"),
            author(4, "Agatha Christie"),
        ],
        books,
        book_authors,
        customers: vec![
            Customer {
                id: 1,
                first_name: "Ursola".to_string(),
                last_name: "Purdy".to_string(),
                email: "upurdy0@cdbaby.com".to_string(),
            },
            Customer {
                id: 2,
                first_name: "Ruthanne".to_string(),
                last_name: "Vatini".to_string(),
                email: "rvatini1@fema.gov".to_string(),
            },
        ],
        publishers: vec![
            Publisher {
                id: 1,
                publisher_name: "10/18".to_string(),
            },
            Publisher {
                id: 2,
                publisher_name: "1st Book Library".to_string(),
            },
            Publisher {
                id: 3,
                publisher_name: "HarperCollins".to_string(),
            },
        ],
        countries: vec![
            Country {
                id: 1,
                country_name: "Afghanistan".to_string(),
            },
            Country {
                id: 2,
                country_name: "Netherlands Antilles".to_string(),
            },
        ],
        shipping_methods: vec![
            ShippingMethod {
                id: 1,
                method_name: "Standard".to_string(),
                cost: 5.9,
            },
            ShippingMethod {
                id: 2,
                method_name: "Priority".to_string(),
                cost: 8.9,
            },
            ShippingMethod {
                id: 3,
                method_name: "Express".to_string(),
                cost: 11.9,
            },
            ShippingMethod {
                id: 4,
                method_name: "International".to_string(),
                cost: 24.5,
            },
        ],
        languages: vec![
            Language {
                id: 1,
                language_code: "eng".to_string(),
                language_name: "English".to_string(),
            },
            Language {
                id: 2,
                language_code: "fre".to_string(),
                language_name: "French".to_string(),
            },
        ],
    }
}

pub fn fixture_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new(fixture_tables()))
}

/// Router over `store` with the default page size
pub fn router_with(store: Arc<MemoryStore>) -> Router {
    build_router(AppState::new(store, 100))
}

pub fn router() -> Router {
    router_with(fixture_store())
}

/// Send a GET and return status plus raw body
pub async fn get_raw(router: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Send a GET and parse the JSON envelope
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_raw(router, uri).await;
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Length of the `data` array
pub fn data_len(json: &Value) -> usize {
    json["data"].as_array().map(Vec::len).unwrap_or(0)
}
