//! Health score engine
//!
//! Combines activity frequency, consistency and calorie balance into a
//! single 0-100 score. Each component is clamped on its own before the sum
//! is rounded and clamped.

use crate::aggregation::{total_calories_burned, total_calories_consumed};
use crate::models::{ActivityRecord, NutritionEntry};
use crate::rounding::round_half_even;
use std::collections::HashSet;

/// Maximum points from workout frequency
pub const ACTIVITY_POINTS: f64 = 40.0;
/// Maximum points from distinct workout days
pub const CONSISTENCY_POINTS: f64 = 30.0;
/// Maximum points from calorie balance
pub const BALANCE_POINTS: f64 = 30.0;

/// The activity set is treated as four weeks of data
const WEEKS_PER_WINDOW: f64 = 4.0;
/// Distinct workout days are measured against a 30 day month
const CONSISTENCY_DAYS: f64 = 30.0;

/// Score components before summing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HealthScoreBreakdown {
    pub activity: f64,
    pub consistency: f64,
    pub balance: f64,
}

impl HealthScoreBreakdown {
    /// Rounded total clamped to 0-100
    pub fn total(&self) -> u8 {
        round_half_even(self.activity + self.consistency + self.balance).clamp(0.0, 100.0) as u8
    }
}

/// Points for average weekly workouts
pub fn activity_component(activities: &[&ActivityRecord]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }

    let weekly_avg = activities.len() as f64 / WEEKS_PER_WINDOW;
    let points: f64 = if weekly_avg >= 5.0 {
        40.0
    } else if weekly_avg >= 3.0 {
        30.0
    } else if weekly_avg >= 1.0 {
        20.0
    } else {
        10.0
    };
    points.min(ACTIVITY_POINTS)
}

/// Points for the number of distinct calendar dates with a workout
pub fn consistency_component(activities: &[&ActivityRecord]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }

    let workout_days: HashSet<_> = activities.iter().map(|a| a.date()).collect();
    (workout_days.len() as f64 / CONSISTENCY_DAYS * CONSISTENCY_POINTS).min(CONSISTENCY_POINTS)
}

/// Points for how closely burned calories track consumed calories
pub fn balance_component(activities: &[&ActivityRecord], nutrition: &[&NutritionEntry]) -> f64 {
    if activities.is_empty() || nutrition.is_empty() {
        return 0.0;
    }

    let consumed = total_calories_consumed(nutrition);
    if consumed <= 0.0 {
        return 0.0;
    }

    let ratio = total_calories_burned(activities) / consumed;
    let points: f64 = if (0.8..=1.2).contains(&ratio) {
        30.0
    } else if (0.6..=1.4).contains(&ratio) {
        20.0
    } else {
        10.0
    };
    points.min(BALANCE_POINTS)
}

/// Compute every component of the score
pub fn health_score_breakdown(
    activities: &[&ActivityRecord],
    nutrition: &[&NutritionEntry],
) -> HealthScoreBreakdown {
    HealthScoreBreakdown {
        activity: activity_component(activities),
        consistency: consistency_component(activities),
        balance: balance_component(activities, nutrition),
    }
}

/// Overall health score in 0-100
pub fn calculate_health_score(activities: &[&ActivityRecord], nutrition: &[&NutritionEntry]) -> u8 {
    health_score_breakdown(activities, nutrition).total()
}
