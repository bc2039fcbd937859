//! Activity logging API routes
//!
//! `POST /activities` accepts both the current field naming
//! (`activityType`, `recordedAt`, `intensity`) and the older one
//! (`activityName`, `date`).

use super::users::field_error;
use crate::error::ApiError;
use crate::services::ActivityService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use strive_hive_shared::validation::{validate_duration_minutes, validate_non_negative, validate_not_blank};
use strive_hive_shared::{ActivityRecord, ActivityUpdate, Intensity, LegacyActivity, NewActivity, RecordId, UserId};
use validator::Validate;

/// Create activity routes
pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .route("/:id", put(update_activity).delete(delete_activity))
}

/// `?userId=` filter shared by the record listings
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
    pub user_id: Option<UserId>,
}

/// Activity body in the current field naming
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 100))]
    pub activity_type: String,
    pub duration: u32,
    pub calories_burned: f64,
    #[serde(default)]
    pub intensity: Intensity,
    pub recorded_at: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Either accepted activity body
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateActivityPayload {
    Current(CreateActivityRequest),
    Legacy(LegacyActivity),
}

impl CreateActivityPayload {
    fn into_new_activity(self) -> Result<NewActivity, ApiError> {
        let input = match self {
            CreateActivityPayload::Current(req) => {
                req.validate()?;
                NewActivity {
                    user_id: req.user_id,
                    activity_type: req.activity_type,
                    duration_minutes: req.duration,
                    calories_burned: req.calories_burned,
                    intensity: req.intensity,
                    recorded_at: req.recorded_at,
                    notes: req.notes,
                }
            }
            CreateActivityPayload::Legacy(legacy) => NewActivity::from(legacy),
        };

        validate_not_blank(&input.activity_type).map_err(field_error("activityType"))?;
        validate_duration_minutes(input.duration_minutes).map_err(field_error("duration"))?;
        validate_non_negative(input.calories_burned).map_err(field_error("caloriesBurned"))?;
        Ok(input)
    }
}

/// Partial activity update body
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[validate(length(min = 1, max = 100))]
    pub activity_type: Option<String>,
    pub duration: Option<u32>,
    pub calories_burned: Option<f64>,
    pub intensity: Option<Intensity>,
    pub recorded_at: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl UpdateActivityRequest {
    fn into_update(self) -> Result<ActivityUpdate, ApiError> {
        self.validate()?;
        if let Some(minutes) = self.duration {
            validate_duration_minutes(minutes).map_err(field_error("duration"))?;
        }
        if let Some(calories) = self.calories_burned {
            validate_non_negative(calories).map_err(field_error("caloriesBurned"))?;
        }

        Ok(ActivityUpdate {
            activity_type: self.activity_type,
            duration_minutes: self.duration,
            calories_burned: self.calories_burned,
            intensity: self.intensity,
            recorded_at: self.recorded_at,
            notes: self.notes,
        })
    }
}

/// GET /api/v1/activities - List activities, optionally for one user
async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<ActivityRecord>>, ApiError> {
    Ok(Json(ActivityService::list(state.store(), query.user_id).await?))
}

/// POST /api/v1/activities - Log an activity
async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivityPayload>,
) -> Result<(StatusCode, Json<ActivityRecord>), ApiError> {
    let activity = ActivityService::create(state.store(), payload.into_new_activity()?).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// PUT /api/v1/activities/:id - Merge changes into an activity
async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(req): Json<UpdateActivityRequest>,
) -> Result<Json<ActivityRecord>, ApiError> {
    Ok(Json(ActivityService::update(state.store(), id, req.into_update()?).await?))
}

/// DELETE /api/v1/activities/:id - Delete an activity
async fn delete_activity(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<Json<Value>, ApiError> {
    let activity = ActivityService::delete(state.store(), id).await?;
    Ok(Json(json!({
        "message": "Activity deleted successfully",
        "deletedActivity": activity,
    })))
}
