//! Activity and nutrition aggregation
//!
//! Folds a user's records inside a time window into summary totals,
//! per-activity-type breakdowns, daily averages, a seven day progress strip
//! and chart series.

use crate::models::{ActivityRecord, Intensity, NutritionEntry, UserId};
use crate::rounding::round_to;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of days in the progress strip
pub const WEEKLY_PROGRESS_DAYS: i64 = 7;

/// A user's records with `recorded_at >= start`
#[derive(Debug, Clone)]
pub struct UserWindow<'a> {
    pub user_id: UserId,
    pub start: DateTime<Utc>,
    pub activities: Vec<&'a ActivityRecord>,
    pub nutrition: Vec<&'a NutritionEntry>,
}

impl<'a> UserWindow<'a> {
    /// Select the records owned by `user_id` recorded at or after `start`
    pub fn select(
        activities: &'a [ActivityRecord],
        nutrition: &'a [NutritionEntry],
        user_id: UserId,
        start: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            start,
            activities: activities
                .iter()
                .filter(|a| a.user_id == user_id && a.recorded_at >= start)
                .collect(),
            nutrition: nutrition
                .iter()
                .filter(|n| n.user_id == user_id && n.recorded_at >= start)
                .collect(),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Period totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_workouts: usize,
    pub total_calories_burned: f64,
    pub total_calories_consumed: f64,
    pub total_workout_time: u64,
    pub net_calories: f64,
    pub average_workout_duration: f64,
}

/// Totals for one activity type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBreakdown {
    pub count: usize,
    pub total_calories: f64,
    pub total_duration: u64,
}

/// Per-day averages over the period length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAverages {
    pub calories_burned: f64,
    pub calories_consumed: f64,
    pub workout_frequency: f64,
}

/// One day of the progress strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub day_name: String,
    pub workouts: usize,
    pub calories_burned: f64,
    pub total_duration: u64,
}

/// Lifetime totals for a user, independent of any period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub user_id: UserId,
    pub total_calories_burned: f64,
    pub total_calories_consumed: f64,
    pub total_workouts: usize,
    pub average_workout_duration: f64,
    pub net_calories: f64,
    pub period: String,
}

/// Sum of burned calories
pub fn total_calories_burned(activities: &[&ActivityRecord]) -> f64 {
    activities.iter().map(|a| a.calories_burned).sum()
}

/// Sum of consumed calories
pub fn total_calories_consumed(nutrition: &[&NutritionEntry]) -> f64 {
    nutrition.iter().map(|n| n.calories).sum()
}

/// Sum of workout minutes
pub fn total_duration(activities: &[&ActivityRecord]) -> u64 {
    activities.iter().map(|a| u64::from(a.duration_minutes)).sum()
}

/// Mean workout length in minutes, one decimal; zero without workouts
pub fn average_workout_duration(activities: &[&ActivityRecord]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    round_to(total_duration(activities) as f64 / activities.len() as f64, 1)
}

/// Summarize a window's totals
pub fn summarize(window: &UserWindow<'_>) -> ReportSummary {
    let burned = total_calories_burned(&window.activities);
    let consumed = total_calories_consumed(&window.nutrition);

    ReportSummary {
        total_workouts: window.activities.len(),
        total_calories_burned: burned,
        total_calories_consumed: consumed,
        total_workout_time: total_duration(&window.activities),
        net_calories: consumed - burned,
        average_workout_duration: average_workout_duration(&window.activities),
    }
}

/// Group activities by type, keeping the order in which types first appear
pub fn activity_breakdown(activities: &[&ActivityRecord]) -> IndexMap<String, ActivityBreakdown> {
    let mut breakdown: IndexMap<String, ActivityBreakdown> = IndexMap::new();
    for activity in activities {
        let entry = breakdown.entry(activity.activity_type.clone()).or_default();
        entry.count += 1;
        entry.total_calories += activity.calories_burned;
        entry.total_duration += u64::from(activity.duration_minutes);
    }
    breakdown
}

/// Whole days between `start` and `now`, never less than one
pub fn days_in_period(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_days().max(1)
}

/// Divide the summary totals by the period length
pub fn daily_averages(summary: &ReportSummary, start: DateTime<Utc>, now: DateTime<Utc>) -> DailyAverages {
    let days = days_in_period(start, now) as f64;
    DailyAverages {
        calories_burned: round_to(summary.total_calories_burned / days, 1),
        calories_consumed: round_to(summary.total_calories_consumed / days, 1),
        workout_frequency: round_to(summary.total_workouts as f64 / days, 2),
    }
}

/// Activity totals for each of the seven days ending today, oldest first
///
/// Days without activity are emitted with zeros.
pub fn weekly_progress(activities: &[&ActivityRecord], now: DateTime<Utc>) -> Vec<DailyProgress> {
    let today = now.date_naive();

    (0..WEEKLY_PROGRESS_DAYS)
        .map(|i| {
            let day = today - Duration::days(WEEKLY_PROGRESS_DAYS - 1 - i);
            let day_activities: Vec<&ActivityRecord> = activities
                .iter()
                .copied()
                .filter(|a| a.date() == day)
                .collect();

            DailyProgress {
                date: day,
                day_name: day.format("%a").to_string(),
                workouts: day_activities.len(),
                calories_burned: total_calories_burned(&day_activities),
                total_duration: total_duration(&day_activities),
            }
        })
        .collect()
}

/// Lifetime analytics over every record a user owns
pub fn user_analytics(
    user_id: UserId,
    activities: &[ActivityRecord],
    nutrition: &[NutritionEntry],
) -> UserAnalytics {
    let activities: Vec<&ActivityRecord> = activities.iter().filter(|a| a.user_id == user_id).collect();
    let nutrition: Vec<&NutritionEntry> = nutrition.iter().filter(|n| n.user_id == user_id).collect();
    let burned = total_calories_burned(&activities);
    let consumed = total_calories_consumed(&nutrition);

    UserAnalytics {
        user_id,
        total_calories_burned: burned,
        total_calories_consumed: consumed,
        total_workouts: activities.len(),
        average_workout_duration: average_workout_duration(&activities),
        net_calories: consumed - burned,
        period: "current_week".to_string(),
    }
}

// ============================================================================
// Chart Series
// ============================================================================

/// Series consumed by the report charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub activity_distribution: Vec<DistributionSlice>,
    pub calories_over_time: Vec<CaloriesPoint>,
    pub intensity_breakdown: Vec<IntensityCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesPoint {
    pub date: NaiveDate,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityCount {
    pub intensity: Intensity,
    pub count: usize,
}

/// Build the chart series for a set of activities
pub fn chart_data(activities: &[&ActivityRecord]) -> ChartData {
    let mut distribution: IndexMap<&str, usize> = IndexMap::new();
    let mut daily_calories: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut intensities: IndexMap<Intensity, usize> = IndexMap::new();

    for activity in activities {
        *distribution.entry(activity.activity_type.as_str()).or_default() += 1;
        *daily_calories.entry(activity.date()).or_default() += activity.calories_burned;
        *intensities.entry(activity.intensity).or_default() += 1;
    }

    ChartData {
        activity_distribution: distribution
            .into_iter()
            .map(|(name, value)| DistributionSlice {
                name: name.to_string(),
                value,
            })
            .collect(),
        calories_over_time: daily_calories
            .into_iter()
            .map(|(date, calories)| CaloriesPoint { date, calories })
            .collect(),
        intensity_breakdown: intensities
            .into_iter()
            .map(|(intensity, count)| IntensityCount { intensity, count })
            .collect(),
    }
}
