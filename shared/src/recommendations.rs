//! Rule-based recommendations
//!
//! Rules are evaluated in a fixed order and each one that holds adds an
//! entry. Only the first two (start / increase frequency) exclude each other.

use crate::models::{ActivityRecord, NutritionEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Workouts below which frequency advice is given
const MIN_WORKOUTS: usize = 3;
/// Distinct activity types below which variety advice is given
const MIN_ACTIVITY_TYPES: usize = 2;
/// Nutrition entries below which tracking advice is given
const MIN_NUTRITION_ENTRIES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Activity,
    Variety,
    Nutrition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// A single piece of advice shown on a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl Recommendation {
    fn new(kind: RecommendationType, priority: Priority, title: &str, description: &str, icon: &str) -> Self {
        Self {
            kind,
            priority,
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    pub fn start_journey() -> Self {
        Self::new(
            RecommendationType::Activity,
            Priority::High,
            "Start Your Fitness Journey",
            "Begin with 20-30 minutes of light exercise 3 times per week.",
            "fa-running",
        )
    }

    pub fn increase_frequency() -> Self {
        Self::new(
            RecommendationType::Activity,
            Priority::Medium,
            "Increase Workout Frequency",
            "Aim for at least 3-4 workouts per week for optimal health benefits.",
            "fa-calendar-check",
        )
    }

    pub fn add_variety() -> Self {
        Self::new(
            RecommendationType::Variety,
            Priority::Medium,
            "Add Exercise Variety",
            "Include different types of exercises like cardio, strength, and flexibility training.",
            "fa-dumbbell",
        )
    }

    pub fn track_nutrition() -> Self {
        Self::new(
            RecommendationType::Nutrition,
            Priority::Medium,
            "Track Your Nutrition",
            "Regular nutrition tracking helps maintain a balanced diet and reach your goals.",
            "fa-apple-alt",
        )
    }
}

/// Generate recommendations for a user's activities and nutrition entries
pub fn generate_recommendations(
    activities: &[&ActivityRecord],
    nutrition: &[&NutritionEntry],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if activities.is_empty() {
        recommendations.push(Recommendation::start_journey());
    } else if activities.len() < MIN_WORKOUTS {
        recommendations.push(Recommendation::increase_frequency());
    }

    let activity_types: HashSet<&str> = activities.iter().map(|a| a.activity_type.as_str()).collect();
    if activity_types.len() < MIN_ACTIVITY_TYPES {
        recommendations.push(Recommendation::add_variety());
    }

    if nutrition.len() < MIN_NUTRITION_ENTRIES {
        recommendations.push(Recommendation::track_nutrition());
    }

    recommendations
}
