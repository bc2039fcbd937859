//! User profile API routes

use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use strive_hive_shared::validation::{validate_age, validate_measurement, validate_not_blank};
use strive_hive_shared::{ActivityLevel, FitnessGoal, Gender, NewUser, UserId, UserProfile, UserUpdate};
use validator::Validate;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Attach the field name to a validation message
pub(crate) fn field_error(field: &str) -> impl Fn(String) -> ApiError + '_ {
    move |message| ApiError::invalid_field(field, message)
}

fn default_age() -> u32 {
    25
}

fn default_height() -> f64 {
    170.0
}

fn default_weight() -> f64 {
    70.0
}

fn default_gender() -> Gender {
    Gender::Male
}

/// Profile creation body; unspecified measurements use typical defaults
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_gender")]
    pub gender: Gender,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    #[validate(range(exclusive_min = 0.0))]
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<u32>,
}

impl CreateUserRequest {
    fn into_new_user(self) -> Result<NewUser, ApiError> {
        self.validate()?;
        validate_not_blank(&self.name).map_err(field_error("name"))?;
        validate_age(self.age).map_err(field_error("age"))?;
        validate_measurement(self.height).map_err(field_error("height"))?;
        validate_measurement(self.weight).map_err(field_error("weight"))?;

        Ok(NewUser {
            name: self.name,
            email: self.email,
            age: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            gender: self.gender,
            activity_level: self.activity_level,
            fitness_goal: self.fitness_goal,
            weight_goal: self.weight_goal,
            calorie_goal: self.calorie_goal,
        })
    }
}

/// Partial profile update body
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    #[validate(range(exclusive_min = 0.0))]
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<u32>,
}

impl UpdateUserRequest {
    fn into_update(self) -> Result<UserUpdate, ApiError> {
        self.validate()?;
        if let Some(name) = &self.name {
            validate_not_blank(name).map_err(field_error("name"))?;
        }
        if let Some(age) = self.age {
            validate_age(age).map_err(field_error("age"))?;
        }
        if let Some(height) = self.height {
            validate_measurement(height).map_err(field_error("height"))?;
        }
        if let Some(weight) = self.weight {
            validate_measurement(weight).map_err(field_error("weight"))?;
        }

        Ok(UserUpdate {
            name: self.name,
            email: self.email,
            age: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            gender: self.gender,
            activity_level: self.activity_level,
            fitness_goal: self.fitness_goal,
            weight_goal: self.weight_goal,
            calorie_goal: self.calorie_goal,
        })
    }
}

/// GET /api/v1/users - List all profiles
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>, ApiError> {
    Ok(Json(UserService::list(state.store()).await?))
}

/// GET /api/v1/users/:id - Get a profile with its derived metrics
async fn get_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(UserService::get(state.store(), id).await?))
}

/// POST /api/v1/users - Create a profile
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    let user = UserService::create(state.store(), req.into_new_user()?).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/v1/users/:id - Merge changes into a profile
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(UserService::update(state.store(), id, req.into_update()?).await?))
}

/// DELETE /api/v1/users/:id - Delete a profile
async fn delete_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<Value>, ApiError> {
    let user = UserService::delete(state.store(), id).await?;
    Ok(Json(json!({
        "message": "User deleted successfully",
        "deletedUser": user,
    })))
}
