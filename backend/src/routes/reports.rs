//! Report API routes
//!
//! - `GET /reports/:user_id/:section`: `trends`, `share`, or a period report
//!   (`week`, `month`, `year`; anything else is a weekly report)
//! - `GET /reports/:user_id/export/:format`: export descriptor
//! - `GET /reports/:user_id/export/:format/file`: downloadable CSV or JSON

use crate::error::ApiError;
use crate::services::{ExportService, ReportService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use strive_hive_shared::{Period, ReportExport, UserId};
use tracing::debug;

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id/:section", get(get_report_section))
        .route("/:user_id/export/:format", get(export_report))
        .route("/:user_id/export/:format/file", get(download_report))
}

/// GET /api/v1/reports/:user_id/:section
async fn get_report_section(
    State(state): State<AppState>,
    Path((user_id, section)): Path<(UserId, String)>,
) -> Result<Response, ApiError> {
    let now = Utc::now();

    let response = match section.as_str() {
        "trends" => Json(ReportService::trends(state.store(), user_id, now).await?).into_response(),
        "share" => Json(ReportService::share(&state.config().share, user_id, now)).into_response(),
        period => {
            let period = Period::resolve(period);
            debug!(user_id, section = %section, period = %period, "Resolved report period");
            Json(ReportService::generate(state.store(), user_id, period, now).await?).into_response()
        }
    };

    Ok(response)
}

/// GET /api/v1/reports/:user_id/export/:format - Describe a monthly report export
async fn export_report(
    State(state): State<AppState>,
    Path((user_id, format)): Path<(UserId, String)>,
) -> Result<Json<ReportExport>, ApiError> {
    let export = ReportService::export(state.store(), &state.config().export, user_id, &format, Utc::now()).await?;
    Ok(Json(export))
}

/// GET /api/v1/reports/:user_id/export/:format/file - Download report data
async fn download_report(
    State(state): State<AppState>,
    Path((user_id, format)): Path<(UserId, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let (body, content_type) = match format.as_str() {
        "csv" => (ExportService::report_csv(state.store(), user_id, now).await?, "text/csv"),
        "json" => (ExportService::report_json(state.store(), user_id, now).await?, "application/json"),
        other => return Err(ApiError::BadRequest(format!("Unsupported download format: {}", other))),
    };

    let disposition = format!(
        "attachment; filename=\"strive-hive-data-{}-{}.{}\"",
        Period::Month.key(),
        now.format("%Y-%m-%d"),
        format
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| ApiError::Internal(e.into()))?,
    );

    Ok((headers, body))
}
