//! User profile service
//!
//! Profiles carry derived body metrics (BMI, BMR, health status) that the
//! shared models recompute on every create and update.

use crate::error::ApiError;
use crate::repositories::{HealthStore, RecordSource, StoreError};
use strive_hive_shared::{NewUser, UserId, UserProfile, UserUpdate};
use tracing::info;

/// User service for profile management
pub struct UserService;

impl UserService {
    pub async fn list(store: &dyn HealthStore) -> Result<Vec<UserProfile>, ApiError> {
        store.list_users().await.map_err(ApiError::Internal)
    }

    pub async fn get(store: &dyn HealthStore, id: UserId) -> Result<UserProfile, ApiError> {
        store
            .get_user(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Create a profile; emails are unique case-insensitively
    pub async fn create(store: &dyn HealthStore, input: NewUser) -> Result<UserProfile, ApiError> {
        let user = store.create_user(input).await.map_err(store_error)?;
        info!(user_id = user.id, "Created user profile");
        Ok(user)
    }

    /// Merge an update into a profile
    pub async fn update(store: &dyn HealthStore, id: UserId, update: UserUpdate) -> Result<UserProfile, ApiError> {
        store
            .update_user(id, update)
            .await
            .map_err(store_error)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Delete a profile, returning it. Records owned by the user are kept.
    pub async fn delete(store: &dyn HealthStore, id: UserId) -> Result<UserProfile, ApiError> {
        let user = store
            .delete_user(id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        info!(user_id = id, "Deleted user profile");
        Ok(user)
    }
}

/// Map store constraint violations to conflicts, anything else to internal
fn store_error(err: anyhow::Error) -> ApiError {
    match err.downcast::<StoreError>() {
        Ok(StoreError::DuplicateEmail) => ApiError::Conflict("Email already registered".to_string()),
        Err(err) => ApiError::Internal(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;
    use strive_hive_shared::Gender;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            age: 40,
            height_cm: 170.0,
            weight_kg: 72.0,
            gender: Gender::Female,
            activity_level: None,
            fitness_goal: None,
            weight_goal: None,
            calorie_goal: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        UserService::create(&store, new_user("a@example.com")).await.unwrap();

        let result = UserService::create(&store, new_user("A@Example.com")).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let store = InMemoryStore::new();
        UserService::create(&store, new_user("a@example.com")).await.unwrap();
        let other = UserService::create(&store, new_user("b@example.com")).await.unwrap();

        let result = UserService::update(
            &store,
            other.id,
            UserUpdate {
                email: Some("a@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let store = InMemoryStore::new();
        let user = UserService::create(&store, new_user("a@example.com")).await.unwrap();

        let updated = UserService::update(
            &store,
            user.id,
            UserUpdate {
                email: Some("a@example.com".to_string()),
                age: Some(41),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.age, 41);
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let store = InMemoryStore::new();
        assert!(matches!(UserService::get(&store, 7).await, Err(ApiError::NotFound(_))));
        assert!(matches!(UserService::delete(&store, 7).await, Err(ApiError::NotFound(_))));
    }
}
