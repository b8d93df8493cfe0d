//! # HTTP Server
//!
//! Combines every route with the request trace layer and the pagination
//! middleware into one Axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, ConfigResult};
use crate::rest_api::{resolve_page, AppState};
use crate::store::Store;

use super::routes::{api_routes, index};

/// Build the router for `state`
pub fn build_router(state: AppState) -> Router {
    let router = api_routes()
        .into_iter()
        .fold(Router::new().route("/", get(index)), |router, (path, handler)| {
            router.route(path, handler)
        });

    router
        // Pagination runs before every handler
        .layer(middleware::from_fn_with_state(state.clone(), resolve_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP server for the Gravity API
pub struct HttpServer {
    addr: SocketAddr,
    router: Router,
}

impl HttpServer {
    /// Create a server for `config` backed by `store`
    pub fn new(config: &AppConfig, store: Arc<dyn Store>) -> ConfigResult<Self> {
        let addr = config.socket_addr()?;
        let state = AppState::new(store, config.response_size_limit);
        Ok(Self {
            addr,
            router: build_router(state),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!(addr = %self.addr, "Gravity API listening");
        axum::serve(listener, self.router).await
    }
}
