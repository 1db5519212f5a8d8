//! API integration tests.
//!
//! These tests verify routing, auth gating and error mapping end to end
//! over mock database connections.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware as axum_middleware,
    Router,
};
use blognest_api::{middleware::auth_middleware, router as api_router, AppState};
use blognest_common::TokenService;
use blognest_core::{BlogService, CategoryService, InteractionService, UserService};
use blognest_db::entities::{blog, category, user};
use blognest_db::repositories::{
    BlogInteractionRepository, BlogRepository, CategoryRepository, UserRepository,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn build_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let blog_repo = BlogRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let interaction_repo = BlogInteractionRepository::new(Arc::clone(&db));

    let interaction_service = InteractionService::new(interaction_repo, blog_repo.clone());

    AppState {
        user_service: UserService::new(user_repo.clone()),
        blog_service: BlogService::new(
            blog_repo.clone(),
            category_repo.clone(),
            user_repo,
            interaction_service.clone(),
        ),
        category_service: CategoryService::new(category_repo, blog_repo),
        interaction_service,
        token_service: TokenService::new("test-secret", 60),
    }
}

fn build_app(state: AppState) -> Router {
    api_router()
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

fn create_test_user(id: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: "$argon2id$fake".to_string(),
        created_at: Utc::now().into(),
    }
}

fn create_test_category(id: &str, name: &str) -> category::Model {
    category::Model {
        id: id.to_string(),
        name: name.to_string(),
        description: "desc".to_string(),
    }
}

fn create_test_blog(id: &str) -> blog::Model {
    blog::Model {
        id: id.to_string(),
        title: "Title".to_string(),
        description: "Description".to_string(),
        body: "Body".to_string(),
        published: true,
        created_at: Utc::now().into(),
        user_id: "u1".to_string(),
        category_id: "c1".to_string(),
    }
}

#[tokio::test]
async fn test_create_blog_without_token_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_app(build_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blog")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"title":"T","description":"D","body":"B","category_id":"c1"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_toggle_like_without_token_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_app(build_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blog/b1/like")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_toggle_like_with_token() {
    // auth middleware user lookup, blog existence check, no prior
    // interaction, then inserted row
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_user("u1")]])
        .append_query_results([[create_test_blog("b1")]])
        .append_query_results([Vec::<blognest_db::entities::blog_interaction::Model>::new()])
        .append_query_results([[blognest_db::entities::blog_interaction::Model {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            blog_id: "b1".to_string(),
            kind: blognest_db::entities::blog_interaction::InteractionKind::Like,
            created_at: Utc::now().into(),
        }]])
        .append_exec_results([sea_orm::MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let state = build_state(db);
    let token = state.token_service.issue("u1").unwrap();
    let app = build_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/blog/b1/like")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_blog_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<blog::Model>::new()])
        .into_connection();
    let app = build_app(build_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/blog/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_categories_public() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[create_test_category("c1", "Art")]])
        .append_query_results([Vec::<std::collections::BTreeMap<&str, sea_orm::Value>>::new()])
        .into_connection();
    let app = build_app(build_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_unknown_email_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();
    let app = build_app(build_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"email":"nobody@example.com","password":"pw"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_signup_invalid_payload_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = build_app(build_state(db));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/user")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"username":"al","email":"not-an-email","password":"short"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
