//! Category endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use blognest_common::AppResult;
use blognest_core::{BlogView, CategoryView};

use crate::{endpoints::blogs::ListQuery, middleware::AppState, response::ApiResponse};

/// List all categories with their blog counts.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<CategoryView>>> {
    let categories = state.category_service.list().await?;
    Ok(ApiResponse::ok(categories))
}

/// List blogs in a category.
async fn blogs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<BlogView>>> {
    let blogs = state
        .blog_service
        .list_by_category(&id, query.search.as_deref())
        .await?;
    Ok(ApiResponse::ok(blogs))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list))
        .route("/categories/{id}/blogs", get(blogs))
}
