//! # Route Handlers
//!
//! One handler per `/v1` endpoint. Listings go straight to the store;
//! searches go through the [`SearchRegistry`](super::SearchRegistry).

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::store::{
    Author, Book, Country, Customer, Language, Page, Publisher, Record, ShippingMethod,
    StoreResult,
};

use super::response::{Envelope, EnvelopeError};
use super::state::AppState;

/// Application error code and title reported by an endpoint
struct Endpoint {
    code: &'static str,
    title: &'static str,
}

const COUNTRIES: Endpoint = Endpoint {
    code: "COUNTRIES-01",
    title: "Error retrieving countries",
};
const AUTHORS: Endpoint = Endpoint {
    code: "AUTHORS-01",
    title: "Error retrieving authors",
};
const AUTHORS_SEARCH: Endpoint = Endpoint {
    code: "AUTHORS-02",
    title: "Error searching authors",
};
const BOOKS: Endpoint = Endpoint {
    code: "BOOKS-01",
    title: "Error retrieving books",
};
const BOOKS_SEARCH: Endpoint = Endpoint {
    code: "BOOKS-02",
    title: "Error searching books",
};
const CUSTOMERS: Endpoint = Endpoint {
    code: "CUSTOMERS-01",
    title: "Error retrieving customers",
};
const CUSTOMERS_SEARCH: Endpoint = Endpoint {
    code: "CUSTOMERS-02",
    title: "Error searching customers",
};
const PUBLISHERS: Endpoint = Endpoint {
    code: "PUBLISHERS-01",
    title: "Error retrieving publishers",
};
const SHIPPING_METHODS: Endpoint = Endpoint {
    code: "SHIPPING-METHODS-01",
    title: "Error retrieving shipping methods",
};
const LANGUAGES: Endpoint = Endpoint {
    code: "LANGUAGES-01",
    title: "Error retrieving languages",
};

/// Wrap a listing result; store errors become a 500
fn listing<T: Serialize>(result: StoreResult<Vec<T>>, endpoint: &Endpoint) -> Envelope<T> {
    match result {
        Ok(rows) => Envelope::data(rows),
        Err(err) => {
            tracing::warn!(code = endpoint.code, error = %err, "listing failed");
            Envelope::error(EnvelopeError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                endpoint.code,
                endpoint.title,
                err.to_string(),
            ))
        }
    }
}

async fn search(
    state: &AppState,
    entity: &str,
    params: &HashMap<String, String>,
    page: Page,
    endpoint: &Endpoint,
) -> Envelope<Record> {
    match state
        .searches
        .dispatch(entity, state.store.as_ref(), params, page)
        .await
    {
        Ok(records) => Envelope::data(records),
        Err(err) => {
            let status = err.status_code();
            if status.is_server_error() {
                tracing::warn!(code = endpoint.code, error = %err, "search failed");
            } else {
                tracing::debug!(code = endpoint.code, error = %err, "search rejected");
            }
            Envelope::error(EnvelopeError::new(
                status,
                endpoint.code,
                endpoint.title,
                err.to_string(),
            ))
        }
    }
}

/// GET /ping
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /v1/countries
pub async fn list_countries(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<Country> {
    listing(state.store.countries(page).await, &COUNTRIES)
}

/// GET /v1/authors
pub async fn list_authors(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<Author> {
    listing(state.store.authors(page).await, &AUTHORS)
}

/// GET /v1/authors/search?name=...
pub async fn search_authors(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
    Query(params): Query<HashMap<String, String>>,
) -> Envelope<Record> {
    search(&state, "authors", &params, page, &AUTHORS_SEARCH).await
}

/// GET /v1/books
pub async fn list_books(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<Book> {
    listing(state.store.books(page).await, &BOOKS)
}

/// GET /v1/books/search?{title|isbn|author}=...
pub async fn search_books(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
    Query(params): Query<HashMap<String, String>>,
) -> Envelope<Record> {
    search(&state, "books", &params, page, &BOOKS_SEARCH).await
}

/// GET /v1/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<Customer> {
    listing(state.store.customers(page).await, &CUSTOMERS)
}

/// GET /v1/customers/search?email=...
pub async fn search_customers(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
    Query(params): Query<HashMap<String, String>>,
) -> Envelope<Record> {
    search(&state, "customers", &params, page, &CUSTOMERS_SEARCH).await
}

/// GET /v1/publishers
pub async fn list_publishers(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<Publisher> {
    listing(state.store.publishers(page).await, &PUBLISHERS)
}

/// GET /v1/shipping-methods
pub async fn list_shipping_methods(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<ShippingMethod> {
    listing(state.store.shipping_methods(page).await, &SHIPPING_METHODS)
}

/// GET /v1/languages
pub async fn list_languages(
    State(state): State<AppState>,
    Extension(page): Extension<Page>,
) -> Envelope<Language> {
    listing(state.store.languages(page).await, &LANGUAGES)
}
