use crate::{analyze, health, submit_job};

use cr_ws::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

pub const WS_ANALYSIS_PATH: &str = "/ws/analysis/";

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Subscribers
        .route(WS_ANALYSIS_PATH, get(cr_ws::handler))
        // Submission
        .route("/api/v1/jobs", post(submit_job))
        .route("/api/analyze/", post(analyze))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        // Browser front ends are served from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
