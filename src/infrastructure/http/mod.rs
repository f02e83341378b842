use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::{
    controllers::{
        health, rewrite::RewriteController, sample::SampleController, user::UserController,
    },
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

use crate::infrastructure::repositories::UserRepository;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    user_repo: Arc<UserRepository>,
    user_controller: Arc<UserController>,
    rewrite_controller: Arc<RewriteController>,
    sample_controller: Arc<SampleController>,
) -> Result<(), Box<dyn std::error::Error>> {
    // User routes (require authentication)
    let user_routes = Router::new()
        .route("/api/me", get(UserController::get_me))
        .route("/api/usage", get(UserController::get_usage))
        .with_state(user_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // Rewrite and export gates (require authentication)
    let rewrite_routes = Router::new()
        .route(
            "/api/rewrites/authorize",
            post(RewriteController::authorize_rewrite),
        )
        .route(
            "/api/exports/authorize",
            post(RewriteController::authorize_export),
        )
        .with_state(rewrite_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // Writing sample routes (require authentication)
    let sample_routes = Router::new()
        .route(
            "/api/samples",
            get(SampleController::list_samples).post(SampleController::create_sample),
        )
        .route(
            "/api/samples/:sampleId",
            axum::routing::delete(SampleController::delete_sample),
        )
        .with_state(sample_controller.clone())
        .layer(middleware::from_fn_with_state(
            (user_repo.clone(), config.clone()),
            auth_middleware,
        ));

    // Build application routes
    let app = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool.clone())
        .merge(user_routes)
        .merge(rewrite_routes)
        .merge(sample_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
