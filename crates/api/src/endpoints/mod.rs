//! API endpoints.

mod auth;
mod blogs;
mod categories;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(blogs::router())
        .merge(categories::router())
}
