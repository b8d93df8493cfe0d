//! Router-level tests for listings, the index page and the envelope.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{data_len, fixture_store, get_json, get_raw, router, router_with};
use gravity_api::http_server::{build_router, route_paths};
use gravity_api::rest_api::AppState;

// =============================================================================
// ROUTE TABLE
// =============================================================================

#[tokio::test]
async fn test_route_status_ok() {
    for route in [
        "/",
        "/ping",
        "/v1/countries",
        "/v1/authors",
        "/v1/books",
        "/v1/customers",
        "/v1/publishers",
        "/v1/shipping-methods",
        "/v1/languages",
    ] {
        let (status, _) = get_raw(router(), route).await;
        assert_eq!(status, StatusCode::OK, "route {}", route);
    }
}

#[tokio::test]
async fn test_route_status_not_found() {
    for route in [
        "/foo",
        "/v1",
        "/v1/foo",
        "/v1/search/authors?name=foo",
        "/v1/search/books?author=foo",
        "/v1/search/books?title=foo",
        "/v1/search/books?isbn=5",
        "/v1/search/customer?email=foo",
    ] {
        let (status, _) = get_raw(router(), route).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "route {}", route);
    }
}

#[tokio::test]
async fn test_ping() {
    let (status, body) = get_raw(router(), "/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "pong");
}

#[tokio::test]
async fn test_index_lists_every_route() {
    let (status, body) = get_raw(router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<li>").count(), route_paths().len());
    assert!(body.contains("shipping-methods"));
}

// =============================================================================
// ENVELOPE
// =============================================================================

#[tokio::test]
async fn test_listing_envelope() {
    let (status, json) = get_json(router(), "/v1/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!([
            {"id": 1, "countryName": "Afghanistan"},
            {"id": 2, "countryName": "Netherlands Antilles"}
        ])
    );
    assert_eq!(json["errors"], json!([]));
    assert!(json["meta"]["timestamp"].is_string());
}

#[tokio::test]
async fn test_listing_records() {
    let (_, json) = get_json(router(), "/v1/shipping-methods").await;
    assert_eq!(data_len(&json), 4);
    assert_eq!(json["data"][3]["methodName"], "International");
    assert_eq!(json["data"][3]["cost"], 24.5);

    let (_, json) = get_json(router(), "/v1/books?limit=1").await;
    let book = &json["data"][0];
    assert_eq!(book["title"], "They Do It With Mirrors");
    assert_eq!(book["isbn"], "9781559277587");
    assert!(book["publicationDate"].is_string());

    let (_, json) = get_json(router(), "/v1/languages").await;
    assert_eq!(json["data"][0]["languageCode"], "eng");

    let (_, json) = get_json(router(), "/v1/publishers").await;
    assert_eq!(json["data"][2]["publisherName"], "HarperCollins");

    let (_, json) = get_json(router(), "/v1/customers").await;
    assert_eq!(json["data"][0]["firstName"], "Ursola");
}

#[tokio::test]
async fn test_closed_store_returns_500() {
    let store = fixture_store();
    store.close();

    let (status, json) = get_json(router_with(Arc::clone(&store)), "/v1/books").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["data"], json!([]));

    let error = &json["errors"][0];
    assert_eq!(error["status"], "500");
    assert_eq!(error["code"], "BOOKS-01");
    assert_eq!(error["title"], "Error retrieving books");
    assert_eq!(error["detail"], "conn closed");
    assert!(error["id"].is_string());

    let (status, json) = get_json(router_with(store), "/v1/shipping-methods").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["errors"][0]["code"], "SHIPPING-METHODS-01");
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let store = fixture_store();
    let (_, first) = get_json(router_with(Arc::clone(&store)), "/v1/books?limit=10&offset=3").await;
    let (_, second) = get_json(router_with(store), "/v1/books?limit=10&offset=3").await;
    assert_eq!(first["data"], second["data"]);
}

#[tokio::test]
async fn test_configured_response_size_limit() {
    let router = build_router(AppState::new(fixture_store(), 25));

    let (_, json) = get_json(router.clone(), "/v1/books").await;
    assert_eq!(data_len(&json), 25);

    let (_, json) = get_json(router, "/v1/books?limit=50").await;
    assert_eq!(data_len(&json), 25);
}
