//! Record repositories
//!
//! The analytics services only see the read-only [`RecordSource`]; the CRUD
//! services use the full [`HealthStore`].

pub mod memory;
pub mod seed;

use anyhow::Result;
use async_trait::async_trait;
use strive_hive_shared::{
    ActivityRecord, ActivityUpdate, NewActivity, NewNutritionEntry, NewUser, NutritionEntry, NutritionUpdate,
    RecordId, UserId, UserProfile, UserUpdate,
};

pub use memory::InMemoryStore;

/// Constraint violations a store reports inside its `anyhow::Error`
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another profile already uses this email (case-insensitive)
    #[error("Email already registered")]
    DuplicateEmail,
}

/// Read-only queries over users and their records
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserProfile>>;

    async fn get_user(&self, id: UserId) -> Result<Option<UserProfile>>;

    /// Activities in insertion order, optionally restricted to one user
    async fn list_activities(&self, user_id: Option<UserId>) -> Result<Vec<ActivityRecord>>;

    /// Nutrition entries in insertion order, optionally restricted to one user
    async fn list_nutrition(&self, user_id: Option<UserId>) -> Result<Vec<NutritionEntry>>;
}

/// Mutable store; update and delete return `None` when the id is unknown
#[async_trait]
pub trait HealthStore: RecordSource {
    /// Fails with [`StoreError::DuplicateEmail`] when the email is taken
    async fn create_user(&self, input: NewUser) -> Result<UserProfile>;

    /// Fails with [`StoreError::DuplicateEmail`] when the new email belongs
    /// to another profile
    async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<Option<UserProfile>>;

    async fn delete_user(&self, id: UserId) -> Result<Option<UserProfile>>;

    async fn create_activity(&self, input: NewActivity) -> Result<ActivityRecord>;

    async fn update_activity(&self, id: RecordId, update: ActivityUpdate) -> Result<Option<ActivityRecord>>;

    async fn delete_activity(&self, id: RecordId) -> Result<Option<ActivityRecord>>;

    async fn create_nutrition(&self, input: NewNutritionEntry) -> Result<NutritionEntry>;

    async fn update_nutrition(&self, id: RecordId, update: NutritionUpdate) -> Result<Option<NutritionEntry>>;

    async fn delete_nutrition(&self, id: RecordId) -> Result<Option<NutritionEntry>>;
}
