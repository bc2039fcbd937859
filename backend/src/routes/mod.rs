//! Route definitions for the Strive Hive API
//!
//! This module organizes all API routes and applies middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod activities;
mod analytics;
mod health;
mod nutrition;
mod reports;
mod users;

pub use activities::activity_routes;
pub use analytics::analytics_routes;
pub use nutrition::nutrition_routes;
pub use reports::report_routes;
pub use users::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // nested "/" only matches the bare prefix
        .route("/api/v1/", get(api_info));

    if state.metrics.is_some() {
        router = router.route("/metrics", get(render_metrics));
    }

    router
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api_info))
        .nest("/users", users::user_routes())
        .nest("/activities", activities::activity_routes())
        .nest("/nutrition", nutrition::nutrition_routes())
        .nest("/analytics", analytics::analytics_routes())
        .nest("/reports", reports::report_routes())
}

/// GET /api/v1/ - Service info and endpoint list
async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "Strive Hive API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": [
            "/health",
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/api/v1/activities",
            "/api/v1/nutrition",
            "/api/v1/analytics/{userId}",
            "/api/v1/reports/{userId}/{period}",
            "/api/v1/reports/{userId}/export/{format}",
            "/api/v1/reports/{userId}/share",
            "/api/v1/reports/{userId}/trends",
        ],
    }))
}

/// GET /metrics - Prometheus exposition
async fn render_metrics(State(state): State<AppState>) -> Result<String, ApiError> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| ApiError::NotFound("Metrics are disabled".to_string()))
}
