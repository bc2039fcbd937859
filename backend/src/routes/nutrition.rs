//! Nutrition logging API routes

use super::activities::RecordQuery;
use super::users::field_error;
use crate::error::ApiError;
use crate::services::NutritionService;
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
use strive_hive_shared::validation::{validate_non_negative, validate_not_blank};
use strive_hive_shared::{NewNutritionEntry, NutritionEntry, NutritionUpdate, RecordId, UserId};
use validator::Validate;

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_nutrition).post(create_nutrition))
        .route("/:id", put(update_nutrition).delete(delete_nutrition))
}

fn check_amounts(calories: Option<f64>, protein: Option<f64>, carbs: Option<f64>, fat: Option<f64>) -> Result<(), ApiError> {
    for (field, value) in [("calories", calories), ("protein", protein), ("carbs", carbs), ("fat", fat)] {
        if let Some(value) = value {
            validate_non_negative(value).map_err(field_error(field))?;
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNutritionRequest {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 200))]
    pub food_name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[validate(length(min = 1, max = 50))]
    pub meal_type: String,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl CreateNutritionRequest {
    fn into_new_entry(self) -> Result<NewNutritionEntry, ApiError> {
        self.validate()?;
        validate_not_blank(&self.food_name).map_err(field_error("foodName"))?;
        check_amounts(Some(self.calories), Some(self.protein), Some(self.carbs), Some(self.fat))?;

        Ok(NewNutritionEntry {
            user_id: self.user_id,
            food_name: self.food_name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            meal_type: self.meal_type,
            recorded_at: self.recorded_at,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNutritionRequest {
    #[validate(length(min = 1, max = 200))]
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    #[validate(length(min = 1, max = 50))]
    pub meal_type: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl UpdateNutritionRequest {
    fn into_update(self) -> Result<NutritionUpdate, ApiError> {
        self.validate()?;
        check_amounts(self.calories, self.protein, self.carbs, self.fat)?;

        Ok(NutritionUpdate {
            food_name: self.food_name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            meal_type: self.meal_type,
            recorded_at: self.recorded_at,
        })
    }
}

/// GET /api/v1/nutrition - List entries, optionally for one user
async fn list_nutrition(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<NutritionEntry>>, ApiError> {
    Ok(Json(NutritionService::list(state.store(), query.user_id).await?))
}

/// POST /api/v1/nutrition - Log a food item
async fn create_nutrition(
    State(state): State<AppState>,
    Json(req): Json<CreateNutritionRequest>,
) -> Result<(StatusCode, Json<NutritionEntry>), ApiError> {
    let entry = NutritionService::create(state.store(), req.into_new_entry()?).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/nutrition/:id
async fn update_nutrition(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(req): Json<UpdateNutritionRequest>,
) -> Result<Json<NutritionEntry>, ApiError> {
    Ok(Json(NutritionService::update(state.store(), id, req.into_update()?).await?))
}

/// DELETE /api/v1/nutrition/:id
async fn delete_nutrition(State(state): State<AppState>, Path(id): Path<RecordId>) -> Result<Json<Value>, ApiError> {
    let entry = NutritionService::delete(state.store(), id).await?;
    Ok(Json(json!({
        "message": "Nutrition entry deleted successfully",
        "deletedNutrition": entry,
    })))
}
