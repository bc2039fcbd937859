//! Activity logging service

use crate::error::ApiError;
use crate::repositories::{HealthStore, RecordSource};
use strive_hive_shared::{ActivityRecord, ActivityUpdate, NewActivity, RecordId, UserId};
use tracing::{debug, info};

/// Activity service for workout records
pub struct ActivityService;

impl ActivityService {
    /// List activities in insertion order, optionally for one user
    pub async fn list(store: &dyn HealthStore, user_id: Option<UserId>) -> Result<Vec<ActivityRecord>, ApiError> {
        store.list_activities(user_id).await.map_err(ApiError::Internal)
    }

    pub async fn create(store: &dyn HealthStore, input: NewActivity) -> Result<ActivityRecord, ApiError> {
        let activity = store.create_activity(input).await.map_err(ApiError::Internal)?;
        info!(
            activity_id = activity.id,
            user_id = activity.user_id,
            activity_type = %activity.activity_type,
            "Logged activity"
        );
        Ok(activity)
    }

    pub async fn update(
        store: &dyn HealthStore,
        id: RecordId,
        update: ActivityUpdate,
    ) -> Result<ActivityRecord, ApiError> {
        store
            .update_activity(id, update)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Activity not found".to_string()))
    }

    pub async fn delete(store: &dyn HealthStore, id: RecordId) -> Result<ActivityRecord, ApiError> {
        let activity = store
            .delete_activity(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Activity not found".to_string()))?;
        debug!(activity_id = id, "Deleted activity");
        Ok(activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use strive_hive_shared::Intensity;

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = InMemoryStore::new();
        let created = ActivityService::create(
            &store,
            NewActivity {
                user_id: 1,
                activity_type: "running".to_string(),
                duration_minutes: 30,
                calories_burned: 300.0,
                intensity: Intensity::High,
                recorded_at: None,
                notes: None,
            },
        )
        .await
        .unwrap();

        let updated = ActivityService::update(
            &store,
            created.id,
            ActivityUpdate {
                calories_burned: Some(320.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.calories_burned, 320.0);
        assert_eq!(updated.intensity, Intensity::High);
        assert_eq!(updated.recorded_at, created.recorded_at);
    }

    #[tokio::test]
    async fn test_delete_unknown_activity() {
        let store = InMemoryStore::new();
        let result = ActivityService::delete(&store, 5).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
