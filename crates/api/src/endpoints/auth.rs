//! Authentication endpoints.

use axum::{extract::State, routing::post, Json, Router};
use blognest_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchange credentials for a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let user = state
        .user_service
        .authenticate(&req.email, &req.password)
        .await?;

    let access_token = state.token_service.issue(&user.id)?;

    Ok(ApiResponse::ok(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
