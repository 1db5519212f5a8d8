//! Blognest server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use blognest_api::{middleware::AppState, router as api_router};
use blognest_common::{Config, TokenService};
use blognest_core::{BlogService, CategoryService, InteractionService, UserService};
use blognest_db::repositories::{
    BlogInteractionRepository, BlogRepository, CategoryRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blognest=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting blognest server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = blognest_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    blognest_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let blog_repo = BlogRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let interaction_repo = BlogInteractionRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let interaction_service =
        InteractionService::new(interaction_repo, blog_repo.clone());
    let blog_service = BlogService::new(
        blog_repo.clone(),
        category_repo.clone(),
        user_repo,
        interaction_service.clone(),
    );
    let category_service = CategoryService::new(category_repo, blog_repo);

    // Seed the category catalog on first boot
    let seeded = category_service.seed_defaults().await?;
    if seeded > 0 {
        info!(count = seeded, "Seeded category catalog");
    }
    let token_service = TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl_minutes,
    );

    // Create app state
    let state = AppState {
        user_service,
        blog_service,
        category_service,
        interaction_service,
        token_service,
    };

    // Build router
    let app = Router::new()
        .merge(api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            blognest_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
