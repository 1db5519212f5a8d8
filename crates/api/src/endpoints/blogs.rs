//! Blog endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use blognest_common::AppResult;
use blognest_core::{BlogView, CreateBlogInput, ToggleOutcome, UpdateBlogInput};
use blognest_db::entities::blog_interaction::InteractionKind;
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// List all blogs, newest first.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<BlogView>>> {
    let blogs = state.blog_service.list(query.search.as_deref()).await?;
    Ok(ApiResponse::ok(blogs))
}

/// Get a blog by ID.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlogView>> {
    let blog = state.blog_service.get(&id).await?;
    Ok(ApiResponse::ok(blog))
}

/// Create a blog owned by the authenticated user.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogInput>,
) -> AppResult<ApiResponse<BlogView>> {
    let blog = state.blog_service.create(input, &user.id).await?;
    Ok(ApiResponse::ok(blog))
}

/// Update a blog. Owner only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateBlogInput>,
) -> AppResult<ApiResponse<BlogView>> {
    let blog = state.blog_service.update(&id, input, &user.id).await?;
    Ok(ApiResponse::ok(blog))
}

/// Delete a blog and its interactions. Owner only.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.blog_service.delete(&id, &user.id).await?;
    Ok(ApiResponse::ok(()))
}

/// Toggle a like on a blog.
async fn like(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ToggleOutcome>> {
    let outcome = state
        .interaction_service
        .toggle(&id, &user.id, InteractionKind::Like)
        .await?;
    Ok(ApiResponse::ok(outcome))
}

/// Toggle a dislike on a blog.
async fn dislike(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ToggleOutcome>> {
    let outcome = state
        .interaction_service
        .toggle(&id, &user.id, InteractionKind::Dislike)
        .await?;
    Ok(ApiResponse::ok(outcome))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list))
        .route("/blog", post(create))
        .route("/blog/{id}", get(show).put(update).delete(delete))
        .route("/blog/{id}/like", post(like))
        .route("/blog/{id}/dislike", post(dislike))
}
