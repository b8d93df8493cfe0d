//! gravity-api - read-only REST API over the Gravity bookstore dataset

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod store;
