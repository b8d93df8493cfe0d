//! # Gravity HTTP Server Module
//!
//! # Endpoints
//!
//! - `/` - Index page listing every route
//! - `/ping` - Liveness check
//! - `/v1/*` - Bookstore listings and searches

pub mod routes;
pub mod server;

pub use routes::{api_routes, render_index, route_paths};
pub use server::{build_router, HttpServer};
