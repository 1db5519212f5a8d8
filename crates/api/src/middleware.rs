//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use blognest_common::TokenService;
use blognest_core::{BlogService, CategoryService, InteractionService, UserService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub blog_service: BlogService,
    pub category_service: CategoryService,
    pub interaction_service: InteractionService,
    pub token_service: TokenService,
}

/// Authentication middleware.
///
/// Resolves a Bearer JWT to a user and attaches it to request extensions.
/// An absent or invalid token leaves the request anonymous; handlers that
/// require auth reject through the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(claims) = state.token_service.validate(token)
    {
        match state.user_service.get(&claims.sub).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Token subject no longer resolves to a user");
            }
        }
    }

    next.run(req).await
}
