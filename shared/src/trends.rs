//! Fitness trend analysis
//!
//! Splits the last 90 days into three fixed 30 day buckets (not calendar
//! months), compares the oldest and newest bucket, and derives the weekly
//! pattern, peak performances and a one month projection.

use crate::aggregation::{total_calories_burned, total_duration};
use crate::models::{ActivityRecord, UserId};
use crate::rounding::{round_half_even, round_to};
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Days of history considered for trends
pub const TREND_WINDOW_DAYS: i64 = 90;
/// Width of one trend bucket
pub const BUCKET_DAYS: i64 = 30;
/// Number of trend buckets
pub const BUCKET_COUNT: i64 = 3;

/// Workout delta beyond which the workout trend moves
const WORKOUT_CHANGE_THRESHOLD: i64 = 2;
/// Calorie delta beyond which the calorie trend moves
const CALORIE_CHANGE_THRESHOLD: f64 = 100.0;

/// Activities needed before projecting
pub const PROJECTION_MIN_ACTIVITIES: usize = 7;
/// Most recent records (list order) used for projecting
pub const PROJECTION_SLICE: usize = 14;
/// Slice length from which projections are medium confidence
const MEDIUM_CONFIDENCE_MIN: usize = 10;

/// Marker for results that could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    InsufficientData,
}

// ============================================================================
// Buckets
// ============================================================================

/// Totals for one 30 day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub total_workouts: usize,
    pub total_calories: f64,
    pub total_duration: u64,
    pub average_intensity: f64,
}

impl TrendBucket {
    pub fn from_activities(activities: &[&ActivityRecord]) -> Self {
        Self {
            total_workouts: activities.len(),
            total_calories: total_calories_burned(activities),
            total_duration: total_duration(activities),
            average_intensity: average_intensity(activities),
        }
    }

    /// Bucket score used by the progress score, capped at 100
    pub fn score(&self) -> f64 {
        (self.total_workouts as f64 * 10.0 + self.total_calories / 10.0).min(100.0)
    }
}

/// Mean intensity on the 1-3 scale, two decimals; zero when empty
pub fn average_intensity(activities: &[&ActivityRecord]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    let total: f64 = activities.iter().map(|a| a.intensity.score()).sum();
    round_to(total / activities.len() as f64, 2)
}

/// Build the three buckets `[now - 30(i+1)d, now - 30i d)` keyed by `YYYY-MM`
/// of the bucket start
///
/// Buckets are inserted newest first, so when two buckets start in the same
/// month the older one replaces the newer one.
pub fn monthly_buckets(activities: &[&ActivityRecord], now: DateTime<Utc>) -> BTreeMap<String, TrendBucket> {
    let mut buckets = BTreeMap::new();

    for i in 0..BUCKET_COUNT {
        let bucket_start = now - Duration::days(BUCKET_DAYS * (i + 1));
        let bucket_end = now - Duration::days(BUCKET_DAYS * i);
        let in_bucket: Vec<&ActivityRecord> = activities
            .iter()
            .copied()
            .filter(|a| a.recorded_at >= bucket_start && a.recorded_at < bucket_end)
            .collect();

        buckets.insert(
            bucket_start.format("%Y-%m").to_string(),
            TrendBucket::from_activities(&in_bucket),
        );
    }

    buckets
}

// ============================================================================
// Trend Analysis
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    fn classify(change: f64, threshold: f64) -> Self {
        if change > threshold {
            TrendDirection::Improving
        } else if change < -threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}

/// Combined label; only improving on both axes counts as improving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallTrend {
    Improving,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub workout_trend: TrendDirection,
    pub calorie_trend: TrendDirection,
    pub workout_change: i64,
    pub calorie_change: f64,
    pub overall_trend: OverallTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendAnalysis {
    Computed(TrendSummary),
    Insufficient { trend: DataStatus },
}

/// Compare the oldest and newest bucket
pub fn analyze_trends(buckets: &BTreeMap<String, TrendBucket>) -> TrendAnalysis {
    let (Some(first), Some(last)) = (buckets.values().next(), buckets.values().next_back()) else {
        return TrendAnalysis::Insufficient {
            trend: DataStatus::InsufficientData,
        };
    };
    if buckets.len() < 2 {
        return TrendAnalysis::Insufficient {
            trend: DataStatus::InsufficientData,
        };
    }

    let workout_change = last.total_workouts as i64 - first.total_workouts as i64;
    let calorie_change = last.total_calories - first.total_calories;

    let workout_trend = TrendDirection::classify(workout_change as f64, WORKOUT_CHANGE_THRESHOLD as f64);
    let calorie_trend = TrendDirection::classify(calorie_change, CALORIE_CHANGE_THRESHOLD);
    let overall_trend = if workout_trend == TrendDirection::Improving && calorie_trend == TrendDirection::Improving {
        OverallTrend::Improving
    } else {
        OverallTrend::Mixed
    };

    TrendAnalysis::Computed(TrendSummary {
        workout_trend,
        calorie_trend,
        workout_change,
        calorie_change,
        overall_trend,
    })
}

/// Average bucket score, rounded; zero without buckets
pub fn progress_score(buckets: &BTreeMap<String, TrendBucket>) -> u32 {
    if buckets.is_empty() {
        return 0;
    }
    let total: f64 = buckets.values().map(TrendBucket::score).sum();
    round_half_even(total / buckets.len() as f64) as u32
}

// ============================================================================
// Weekly Pattern
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPattern {
    pub workout_count: usize,
    pub average_calories: i64,
    pub average_duration: i64,
}

/// Workouts grouped by weekday name, in first-seen order
pub fn weekly_pattern(activities: &[&ActivityRecord]) -> IndexMap<String, DayPattern> {
    let mut by_day: IndexMap<String, Vec<&ActivityRecord>> = IndexMap::new();
    for activity in activities {
        by_day
            .entry(activity.recorded_at.format("%A").to_string())
            .or_default()
            .push(activity);
    }

    by_day
        .into_iter()
        .map(|(day, day_activities)| {
            let count = day_activities.len() as f64;
            let pattern = DayPattern {
                workout_count: day_activities.len(),
                average_calories: round_half_even(total_calories_burned(&day_activities) / count) as i64,
                average_duration: round_half_even(total_duration(&day_activities) as f64 / count) as i64,
            };
            (day, pattern)
        })
        .collect()
}

// ============================================================================
// Peak Performance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCalorieDay {
    pub date: DateTime<Utc>,
    pub calories: f64,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongestWorkout {
    pub date: DateTime<Utc>,
    pub duration: u32,
    pub activity: String,
}

/// Best single efforts; both fields are absent when there are no activities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakPerformance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_calorie_day: Option<BestCalorieDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_workout: Option<LongestWorkout>,
}

/// First record holding the maximum key; later equal keys never win
fn first_max_by<'a>(activities: &[&'a ActivityRecord], key: impl Fn(&ActivityRecord) -> f64) -> Option<&'a ActivityRecord> {
    activities.iter().copied().fold(None, |best, candidate| match best {
        Some(current) if key(current) >= key(candidate) => Some(current),
        _ => Some(candidate),
    })
}

pub fn peak_performance(activities: &[&ActivityRecord]) -> PeakPerformance {
    PeakPerformance {
        best_calorie_day: first_max_by(activities, |a| a.calories_burned).map(|a| BestCalorieDay {
            date: a.recorded_at,
            calories: a.calories_burned,
            activity: a.activity_type.clone(),
        }),
        longest_workout: first_max_by(activities, |a| f64::from(a.duration_minutes)).map(|a| LongestWorkout {
            date: a.recorded_at,
            duration: a.duration_minutes,
            activity: a.activity_type.clone(),
        }),
    }
}

// ============================================================================
// Projections
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    pub projected_calories: i64,
    pub projected_workouts: u32,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    Projected(MonthlyProjection),
    Insufficient { status: DataStatus },
}

/// Project the next month from the last 14 records in list order
///
/// The slice is positional: records are assumed to be stored in the order
/// they happened.
pub fn project_next_month(activities: &[&ActivityRecord]) -> Projection {
    if activities.len() < PROJECTION_MIN_ACTIVITIES {
        return Projection::Insufficient {
            status: DataStatus::InsufficientData,
        };
    }

    let recent = &activities[activities.len().saturating_sub(PROJECTION_SLICE)..];
    let weekly_avg_calories = total_calories_burned(recent) / 2.0;
    let weekly_avg_workouts = recent.len() as f64 / 2.0;

    Projection::Projected(MonthlyProjection {
        projected_calories: round_half_even(weekly_avg_calories * 4.0) as i64,
        projected_workouts: round_half_even(weekly_avg_workouts * 4.0) as u32,
        confidence: if recent.len() >= MEDIUM_CONFIDENCE_MIN {
            Confidence::Medium
        } else {
            Confidence::Low
        },
    })
}

// ============================================================================
// Trends Report
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessTrends {
    pub user_id: UserId,
    pub trends_data: BTreeMap<String, TrendBucket>,
    pub trend_analysis: TrendAnalysis,
    pub progress_score: u32,
    pub weekly_pattern: IndexMap<String, DayPattern>,
    pub peak_performance: PeakPerformance,
    pub projections: Projection,
}

/// Compute the full trends view for a user
pub fn fitness_trends(user_id: UserId, activities: &[ActivityRecord], now: DateTime<Utc>) -> FitnessTrends {
    let window_start = now - Duration::days(TREND_WINDOW_DAYS);
    let user_activities: Vec<&ActivityRecord> = activities.iter().filter(|a| a.user_id == user_id).collect();
    let recent: Vec<&ActivityRecord> = user_activities
        .iter()
        .copied()
        .filter(|a| a.recorded_at >= window_start)
        .collect();

    let trends_data = monthly_buckets(&recent, now);

    FitnessTrends {
        user_id,
        trend_analysis: analyze_trends(&trends_data),
        progress_score: progress_score(&trends_data),
        trends_data,
        weekly_pattern: weekly_pattern(&recent),
        peak_performance: peak_performance(&recent),
        projections: project_next_month(&user_activities),
    }
}
