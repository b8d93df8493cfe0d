//! Route Table
//!
//! Single list of API routes, shared by the router, the index page and the
//! `routes` CLI command.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use minijinja::{context, Environment};

use crate::rest_api::handlers;
use crate::rest_api::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../views/index.html");

/// Every API route with its handler, in registration order
pub fn api_routes() -> Vec<(&'static str, MethodRouter<AppState>)> {
    vec![
        ("/ping", get(handlers::ping)),
        ("/v1/countries", get(handlers::list_countries)),
        ("/v1/authors", get(handlers::list_authors)),
        ("/v1/authors/search", get(handlers::search_authors)),
        ("/v1/books", get(handlers::list_books)),
        ("/v1/books/search", get(handlers::search_books)),
        ("/v1/customers", get(handlers::list_customers)),
        ("/v1/customers/search", get(handlers::search_customers)),
        ("/v1/publishers", get(handlers::list_publishers)),
        ("/v1/shipping-methods", get(handlers::list_shipping_methods)),
        ("/v1/languages", get(handlers::list_languages)),
    ]
}

/// Paths of every registered route, including the index page
pub fn route_paths() -> Vec<&'static str> {
    std::iter::once("/")
        .chain(api_routes().into_iter().map(|(path, _)| path))
        .collect()
}

/// Render the index page listing `routes`
pub fn render_index(routes: &[&str]) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    env.get_template("index.html")?
        .render(context! { routes => routes })
}

/// GET /
pub async fn index() -> Response {
    match render_index(&route_paths()) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "index template failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
