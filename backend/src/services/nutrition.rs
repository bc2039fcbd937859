//! Nutrition logging service

use crate::error::ApiError;
use crate::repositories::{HealthStore, RecordSource};
use strive_hive_shared::{NewNutritionEntry, NutritionEntry, NutritionUpdate, RecordId, UserId};
use tracing::{debug, info};

/// Nutrition service for food log entries
pub struct NutritionService;

impl NutritionService {
    pub async fn list(store: &dyn HealthStore, user_id: Option<UserId>) -> Result<Vec<NutritionEntry>, ApiError> {
        store.list_nutrition(user_id).await.map_err(ApiError::Internal)
    }

    pub async fn create(store: &dyn HealthStore, input: NewNutritionEntry) -> Result<NutritionEntry, ApiError> {
        let entry = store.create_nutrition(input).await.map_err(ApiError::Internal)?;
        info!(entry_id = entry.id, user_id = entry.user_id, meal_type = %entry.meal_type, "Logged nutrition entry");
        Ok(entry)
    }

    pub async fn update(
        store: &dyn HealthStore,
        id: RecordId,
        update: NutritionUpdate,
    ) -> Result<NutritionEntry, ApiError> {
        store
            .update_nutrition(id, update)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Nutrition entry not found".to_string()))
    }

    pub async fn delete(store: &dyn HealthStore, id: RecordId) -> Result<NutritionEntry, ApiError> {
        let entry = store
            .delete_nutrition(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Nutrition entry not found".to_string()))?;
        debug!(entry_id = id, "Deleted nutrition entry");
        Ok(entry)
    }
}
