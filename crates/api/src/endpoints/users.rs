//! User endpoints.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use blognest_common::AppResult;
use blognest_core::{BlogView, CreateUserInput, UserView};

use crate::{middleware::AppState, response::ApiResponse};

/// Create a new user account.
async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<ApiResponse<UserView>> {
    let user = state.user_service.create(input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Get a user by ID.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserView>> {
    let user = state.user_service.get(&id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// List blogs created by a user.
async fn blogs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<BlogView>>> {
    state.user_service.get(&id).await?;
    let blogs = state.blog_service.list_by_user(&id).await?;
    Ok(ApiResponse::ok(blogs))
}

/// List blogs a user currently likes.
async fn liked(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<BlogView>>> {
    state.user_service.get(&id).await?;
    let blogs = state.blog_service.list_liked_by_user(&id).await?;
    Ok(ApiResponse::ok(blogs))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user", post(signup))
        .route("/user/{id}", get(show))
        .route("/user/{id}/blogs", get(blogs))
        .route("/user/{id}/liked", get(liked))
}
