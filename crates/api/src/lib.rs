//! HTTP API layer for blognest.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: auth, users, blogs, categories
//! - **Extractors**: Authentication
//! - **Middleware**: Bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
