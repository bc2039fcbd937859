//! Lifetime analytics API route

use crate::error::ApiError;
use crate::services::ReportService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use strive_hive_shared::aggregation::UserAnalytics;
use strive_hive_shared::UserId;

/// Create analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/:user_id", get(get_analytics))
}

/// GET /api/v1/analytics/:user_id - Totals over every record the user owns
async fn get_analytics(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserAnalytics>, ApiError> {
    Ok(Json(ReportService::analytics(state.store(), user_id).await?))
}
