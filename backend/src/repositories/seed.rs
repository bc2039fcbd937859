//! Demo dataset loaded when `store.seed_sample_data` is set
//!
//! Timestamps are relative to the seeding instant so fresh reports always
//! have something to show.

use chrono::{DateTime, Duration, Utc};
use strive_hive_shared::{
    ActivityLevel, ActivityRecord, FitnessGoal, Gender, Intensity, NewUser, NutritionEntry, UserProfile,
};

/// Records to pre-populate a store with
#[derive(Debug, Clone, Default)]
pub struct SampleData {
    pub users: Vec<UserProfile>,
    pub activities: Vec<ActivityRecord>,
    pub nutrition: Vec<NutritionEntry>,
}

impl SampleData {
    pub fn generate(now: DateTime<Utc>) -> Self {
        let users = vec![
            UserProfile::create(
                1,
                NewUser {
                    name: "John Doe".to_string(),
                    email: "john.doe@example.com".to_string(),
                    age: 28,
                    height_cm: 175.0,
                    weight_kg: 70.0,
                    gender: Gender::Male,
                    activity_level: Some(ActivityLevel::ModeratelyActive),
                    fitness_goal: Some(FitnessGoal::WeightLoss),
                    weight_goal: Some(68.0),
                    calorie_goal: Some(2200),
                },
                now,
            ),
            UserProfile::create(
                2,
                NewUser {
                    name: "Jane Smith".to_string(),
                    email: "jane.smith@example.com".to_string(),
                    age: 25,
                    height_cm: 165.0,
                    weight_kg: 60.0,
                    gender: Gender::Female,
                    activity_level: Some(ActivityLevel::Active),
                    fitness_goal: Some(FitnessGoal::Maintain),
                    weight_goal: Some(58.0),
                    calorie_goal: Some(1800),
                },
                now,
            ),
        ];

        let activity = |id, user_id, kind: &str, minutes, calories, intensity, ago: Duration, notes: &str| {
            ActivityRecord {
                id,
                user_id,
                activity_type: kind.to_string(),
                duration_minutes: minutes,
                calories_burned: calories,
                intensity,
                recorded_at: now - ago,
                notes: Some(notes.to_string()),
                updated_at: None,
            }
        };

        let activities = vec![
            activity(1, 1, "running", 30, 300.0, Intensity::Medium, Duration::hours(28), "Morning run in the park"),
            activity(2, 1, "cycling", 45, 400.0, Intensity::High, Duration::hours(17), "Evening bike ride"),
            activity(3, 1, "swimming", 60, 500.0, Intensity::High, Duration::hours(40), "Pool swimming session"),
            activity(4, 1, "weightlifting", 45, 250.0, Intensity::Medium, Duration::hours(67), "Upper body workout"),
            activity(5, 1, "yoga", 60, 200.0, Intensity::Low, Duration::hours(88), "Morning yoga session"),
            activity(6, 2, "yoga", 60, 180.0, Intensity::Low, Duration::hours(30), "Flow class"),
            activity(7, 2, "running", 25, 260.0, Intensity::High, Duration::hours(54), "Interval training"),
        ];

        let meal = |id, user_id, food: &str, calories, protein, carbs, fat, meal_type: &str, ago: Duration| {
            NutritionEntry {
                id,
                user_id,
                food_name: food.to_string(),
                calories,
                protein,
                carbs,
                fat,
                meal_type: meal_type.to_string(),
                recorded_at: now - ago,
                updated_at: None,
            }
        };

        let nutrition = vec![
            meal(1, 1, "Chicken Salad", 350.0, 25.0, 15.0, 12.0, "lunch", Duration::hours(24)),
            meal(2, 1, "Oatmeal with Berries", 300.0, 10.0, 54.0, 6.0, "breakfast", Duration::hours(29)),
            meal(3, 2, "Greek Yogurt", 150.0, 15.0, 8.0, 4.0, "snack", Duration::hours(26)),
        ];

        Self {
            users,
            activities,
            nutrition,
        }
    }
}
