//! Health metrics calculations module
//!
//! Provides BMI, BMR, BMI-based health status classification and the daily
//! calorie goal for a user profile.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Derived, not stored**: Metrics are recomputed whenever height,
//!    weight, age or gender change

use crate::models::{ActivityLevel, FitnessGoal, Gender, DEFAULT_ACTIVITY_MULTIPLIER};
use crate::rounding::{round_half_even, round_to};
use serde::{Deserialize, Serialize};

// ============================================================================
// BMI Calculations
// ============================================================================

/// Health status derived from BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl HealthStatus {
    /// Get the BMI range for this status (lower bound inclusive)
    pub fn range(&self) -> (f64, f64) {
        match self {
            HealthStatus::Underweight => (0.0, 18.5),
            HealthStatus::Normal => (18.5, 25.0),
            HealthStatus::Overweight => (25.0, 30.0),
            HealthStatus::Obese => (30.0, f64::INFINITY),
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            HealthStatus::Underweight => "Underweight",
            HealthStatus::Normal => "Normal",
            HealthStatus::Overweight => "Overweight",
            HealthStatus::Obese => "Obese",
        }
    }
}

/// Calculate BMI from height and weight
///
/// Formula: BMI = weight(kg) / height(m)², rounded to one decimal.
/// Returns `None` when the height is not positive.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm.is_nan() || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round_to(weight_kg / (height_m * height_m), 1))
}

/// Classify BMI into a health status
pub fn classify_health_status(bmi: f64) -> HealthStatus {
    if bmi < 18.5 {
        HealthStatus::Underweight
    } else if bmi < 25.0 {
        HealthStatus::Normal
    } else if bmi < 30.0 {
        HealthStatus::Overweight
    } else {
        HealthStatus::Obese
    }
}

// ============================================================================
// BMR Calculations
// ============================================================================

/// Unrounded Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Everyone else: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Basal Metabolic Rate rounded to whole kcal
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> i64 {
    round_half_even(mifflin_st_jeor(weight_kg, height_cm, age_years, gender)) as i64
}

// ============================================================================
// Calorie Goal
// ============================================================================

/// Daily calorie target from BMR, activity level and fitness goal
///
/// TDEE = BMR × activity multiplier (moderately active when unknown), then
/// shifted by the goal's surplus or deficit.
pub fn calculate_calorie_goal(bmr: f64, level: Option<ActivityLevel>, goal: Option<FitnessGoal>) -> i64 {
    let multiplier = level.map_or(DEFAULT_ACTIVITY_MULTIPLIER, |l| l.multiplier());
    let adjustment = goal.map_or(0.0, |g| g.calorie_adjustment());
    round_half_even(bmr * multiplier + adjustment) as i64
}

// ============================================================================
// Derived Profile Metrics
// ============================================================================

/// Metrics derived from a profile's body measurements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub bmi: Option<f64>,
    pub bmr: i64,
    pub health_status: Option<HealthStatus>,
}

/// Compute BMI, BMR and health status in one pass
pub fn derive_metrics(height_cm: f64, weight_kg: f64, age_years: u32, gender: Gender) -> DerivedMetrics {
    let bmi = compute_bmi(height_cm, weight_kg);
    DerivedMetrics {
        bmi,
        bmr: compute_bmr(weight_kg, height_cm, age_years, gender),
        health_status: bmi.map(classify_health_status),
    }
}
