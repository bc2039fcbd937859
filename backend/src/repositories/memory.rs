//! In-memory record store
//!
//! Three insertion-ordered collections behind one `tokio::sync::RwLock`.
//! Reads clone a snapshot so the lock is never held while analytics run.

use super::seed::SampleData;
use super::{HealthStore, RecordSource, StoreError};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use strive_hive_shared::{
    ActivityRecord, ActivityUpdate, NewActivity, NewNutritionEntry, NewUser, NutritionEntry, NutritionUpdate,
    RecordId, UserId, UserProfile, UserUpdate,
};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<UserProfile>,
    activities: Vec<ActivityRecord>,
    nutrition: Vec<NutritionEntry>,
}

/// Process-local store used by the server and the tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Collections>,
}

/// Next id after the largest existing one, starting at 1
fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max + 1)
}

/// Whether a profile other than `owner` already uses `email`
fn email_taken(users: &[UserProfile], email: &str, owner: Option<UserId>) -> bool {
    users
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != owner)
}

/// Remove and return the first item matching `predicate`, keeping order
fn remove_where<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> Option<T> {
    items.iter().position(predicate).map(|index| items.remove(index))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given records
    pub fn with_data(data: SampleData) -> Self {
        Self {
            data: RwLock::new(Collections {
                users: data.users,
                activities: data.activities,
                nutrition: data.nutrition,
            }),
        }
    }
}

#[async_trait]
impl RecordSource for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<UserProfile>> {
        Ok(self.data.read().await.users.clone())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<UserProfile>> {
        Ok(self.data.read().await.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_activities(&self, user_id: Option<UserId>) -> Result<Vec<ActivityRecord>> {
        let data = self.data.read().await;
        Ok(data
            .activities
            .iter()
            .filter(|a| user_id.map_or(true, |id| a.user_id == id))
            .cloned()
            .collect())
    }

    async fn list_nutrition(&self, user_id: Option<UserId>) -> Result<Vec<NutritionEntry>> {
        let data = self.data.read().await;
        Ok(data
            .nutrition
            .iter()
            .filter(|n| user_id.map_or(true, |id| n.user_id == id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HealthStore for InMemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<UserProfile> {
        let mut data = self.data.write().await;
        if email_taken(&data.users, &input.email, None) {
            return Err(StoreError::DuplicateEmail.into());
        }
        let id = next_id(data.users.iter().map(|u| u.id));
        let user = UserProfile::create(id, input, Utc::now());
        data.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<Option<UserProfile>> {
        let mut data = self.data.write().await;
        let Some(index) = data.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = &update.email {
            if email_taken(&data.users, email, Some(id)) {
                return Err(StoreError::DuplicateEmail.into());
            }
        }

        let user = &mut data.users[index];
        user.apply(update, Utc::now());
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: UserId) -> Result<Option<UserProfile>> {
        Ok(remove_where(&mut self.data.write().await.users, |u| u.id == id))
    }

    async fn create_activity(&self, input: NewActivity) -> Result<ActivityRecord> {
        let mut data = self.data.write().await;
        let id = next_id(data.activities.iter().map(|a| a.id));
        let activity = ActivityRecord::create(id, input, Utc::now());
        data.activities.push(activity.clone());
        Ok(activity)
    }

    async fn update_activity(&self, id: RecordId, update: ActivityUpdate) -> Result<Option<ActivityRecord>> {
        let mut data = self.data.write().await;
        Ok(data.activities.iter_mut().find(|a| a.id == id).map(|activity| {
            activity.apply(update, Utc::now());
            activity.clone()
        }))
    }

    async fn delete_activity(&self, id: RecordId) -> Result<Option<ActivityRecord>> {
        Ok(remove_where(&mut self.data.write().await.activities, |a| a.id == id))
    }

    async fn create_nutrition(&self, input: NewNutritionEntry) -> Result<NutritionEntry> {
        let mut data = self.data.write().await;
        let id = next_id(data.nutrition.iter().map(|n| n.id));
        let entry = NutritionEntry::create(id, input, Utc::now());
        data.nutrition.push(entry.clone());
        Ok(entry)
    }

    async fn update_nutrition(&self, id: RecordId, update: NutritionUpdate) -> Result<Option<NutritionEntry>> {
        let mut data = self.data.write().await;
        Ok(data.nutrition.iter_mut().find(|n| n.id == id).map(|entry| {
            entry.apply(update, Utc::now());
            entry.clone()
        }))
    }

    async fn delete_nutrition(&self, id: RecordId) -> Result<Option<NutritionEntry>> {
        Ok(remove_where(&mut self.data.write().await.nutrition, |n| n.id == id))
    }
}
