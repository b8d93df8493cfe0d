//! # Gravity REST API Module
//!
//! Read-only `/v1` endpoints over the bookstore store: pagination
//! middleware, search dispatch and the uniform response envelope.

pub mod errors;
pub mod handlers;
pub mod pagination;
pub mod response;
pub mod search;
pub mod state;

pub use errors::{SearchError, SearchResult};
pub use pagination::{resolve_page, PAGINATION_PARAMS};
pub use response::{Envelope, EnvelopeError, Meta};
pub use search::{AuthorSearch, BookSearch, CustomerSearch, SearchRegistry, Searchable};
pub use state::AppState;
