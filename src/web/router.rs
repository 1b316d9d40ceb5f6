//! Router configuration for the feedhub API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::dto::HealthResponse;
use super::error::ApiError;
use super::handlers::{
    create_feed, create_feed_follow, create_user, delete_feed_follow, get_all_feeds,
    get_feed_follows, get_posts, get_user, AppState,
};
use super::middleware::{create_cors_layer, inject_state};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let v1_routes = Router::new()
        .route("/healthz", get(health_check))
        .route("/err", get(error_check))
        .route("/users", post(create_user).get(get_user))
        .route("/feeds", post(create_feed).get(get_all_feeds))
        .route("/feed_follows", post(create_feed_follow).get(get_feed_follows))
        .route("/feed_follows/:feed_follow_id", delete(delete_feed_follow))
        .route("/posts", get(get_posts));

    // Clone app_state for the middleware closure
    let state_for_middleware = app_state.clone();

    Router::new()
        .nest("/v1", v1_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = state_for_middleware.clone();
                    inject_state(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Error check handler, always fails.
async fn error_check() -> ApiError {
    ApiError::internal("Internal Server Error")
}
