use crate::api::{self, ApiState};
use crate::health;

use lh_ws::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(ws_state: AppState, api_state: ApiState) -> Router {
    // WebSocket endpoints, one per topic
    let ws_routes = Router::new()
        .route("/ws/dashboard", get(lh_ws::dashboard_handler))
        .route("/ws/threats", get(lh_ws::threats_handler))
        .route("/ws/analytics", get(lh_ws::analytics_handler))
        .with_state(ws_state);

    // REST trigger endpoints
    let api_routes = Router::new()
        .route("/api/logs", post(api::logs::create_log))
        .route("/api/threats/{id}/resolve", post(api::threats::resolve_threat))
        .route("/api/users", post(api::users::create_user))
        .with_state(api_state);

    Router::new()
        .merge(ws_routes)
        .merge(api_routes)
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // CORS middleware (allow all origins for WebSocket)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
