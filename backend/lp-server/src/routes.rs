use crate::{
    AppState, add_app, delete_app, health, list_apps, read_app_log, start_all, start_app, stop_all,
    stop_app,
};

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        // Apps
        .route("/api/v1/apps", get(list_apps).post(add_app))
        .route("/api/v1/apps/{name}", delete(delete_app))
        .route("/api/v1/apps/{name}/start", post(start_app))
        .route("/api/v1/apps/{name}/stop", post(stop_app))
        .route("/api/v1/apps/{name}/logs", get(read_app_log))
        // Bulk
        .route("/api/v1/start-all", post(start_all))
        .route("/api/v1/stop-all", post(stop_all))
        .with_state(state)
        // Dashboard may be served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
