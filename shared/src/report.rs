//! Report assembly
//!
//! A report is derived on every request from a read-only snapshot of the
//! record collections and is never stored.

use crate::aggregation::{
    activity_breakdown, chart_data, daily_averages, summarize, user_analytics, weekly_progress, ActivityBreakdown,
    ChartData, DailyAverages, DailyProgress, ReportSummary, UserAnalytics, UserWindow,
};
use crate::errors::{ensure_finite, AnalyticsError, AnalyticsResult};
use crate::health_score::calculate_health_score;
use crate::models::{ActivityRecord, NutritionEntry, UserId};
use crate::recommendations::{generate_recommendations, Recommendation};
use crate::trends::{fitness_trends, FitnessTrends};
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    /// Lenient parse: anything unrecognised is a week
    pub fn resolve(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    pub fn key(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// Label shown on the report
    pub fn display_name(&self) -> &'static str {
        match self {
            Period::Week => "Weekly",
            Period::Month => "Monthly",
            Period::Year => "Yearly",
        }
    }

    pub fn lookback_days(&self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Year => 365,
        }
    }

    /// Start of the period ending at `now`
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.lookback_days())
    }
}

impl FromStr for Period {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(AnalyticsError::InvalidPeriod(s.to_string())),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A generated fitness report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: String,
    pub user_id: UserId,
    pub period: String,
    pub date_range: DateRange,
    pub summary: ReportSummary,
    pub daily_averages: DailyAverages,
    pub activity_breakdown: IndexMap<String, ActivityBreakdown>,
    pub weekly_progress: Vec<DailyProgress>,
    pub health_score: u8,
    pub recommendations: Vec<Recommendation>,
    pub chart_data: ChartData,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Reject reports carrying NaN or infinite figures
    fn check_finite(&self) -> AnalyticsResult<()> {
        let summary = &self.summary;
        ensure_finite("totalCaloriesBurned", summary.total_calories_burned)?;
        ensure_finite("totalCaloriesConsumed", summary.total_calories_consumed)?;
        ensure_finite("netCalories", summary.net_calories)?;
        ensure_finite("averageWorkoutDuration", summary.average_workout_duration)?;
        ensure_finite("dailyAverages.caloriesBurned", self.daily_averages.calories_burned)?;
        ensure_finite("dailyAverages.caloriesConsumed", self.daily_averages.calories_consumed)?;
        ensure_finite("dailyAverages.workoutFrequency", self.daily_averages.workout_frequency)?;
        for (activity_type, breakdown) in &self.activity_breakdown {
            ensure_finite(activity_type, breakdown.total_calories)?;
        }
        for day in &self.weekly_progress {
            ensure_finite("weeklyProgress.caloriesBurned", day.calories_burned)?;
        }
        Ok(())
    }
}

/// Builds reports, analytics and trends over a snapshot of records
pub struct ReportAssembler<'a> {
    activities: &'a [ActivityRecord],
    nutrition: &'a [NutritionEntry],
}

impl<'a> ReportAssembler<'a> {
    pub fn new(activities: &'a [ActivityRecord], nutrition: &'a [NutritionEntry]) -> Self {
        Self { activities, nutrition }
    }

    /// Assemble the report for `user_id` over `period` ending at `now`
    ///
    /// Records are selected by `recorded_at >= start` only; future-dated
    /// records are included.
    pub fn generate(&self, user_id: UserId, period: Period, now: DateTime<Utc>) -> AnalyticsResult<Report> {
        let start = period.start(now);
        let window = UserWindow::select(self.activities, self.nutrition, user_id, start);
        let summary = summarize(&window);

        let report = Report {
            report_id: format!("report_{}_{}_{}", user_id, period.key(), now.timestamp()),
            user_id,
            period: period.display_name().to_string(),
            date_range: DateRange {
                start_date: start,
                end_date: now,
            },
            daily_averages: daily_averages(&summary, start, now),
            summary,
            activity_breakdown: activity_breakdown(&window.activities),
            weekly_progress: weekly_progress(&window.activities, now),
            health_score: calculate_health_score(&window.activities, &window.nutrition),
            recommendations: generate_recommendations(&window.activities, &window.nutrition),
            chart_data: chart_data(&window.activities),
            generated_at: now,
        };

        report.check_finite()?;
        Ok(report)
    }

    /// Lifetime analytics for a user
    pub fn analytics(&self, user_id: UserId) -> AnalyticsResult<UserAnalytics> {
        let analytics = user_analytics(user_id, self.activities, self.nutrition);
        ensure_finite("totalCaloriesBurned", analytics.total_calories_burned)?;
        ensure_finite("totalCaloriesConsumed", analytics.total_calories_consumed)?;
        ensure_finite("averageWorkoutDuration", analytics.average_workout_duration)?;
        Ok(analytics)
    }

    pub fn trends(&self, user_id: UserId, now: DateTime<Utc>) -> FitnessTrends {
        fitness_trends(user_id, self.activities, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intensity;
    use crate::recommendations::Priority;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 15, 12, 0, 0).unwrap()
    }

    fn activity(id: u64, user_id: UserId, kind: &str, days_ago: i64, calories: f64) -> ActivityRecord {
        ActivityRecord {
            id,
            user_id,
            activity_type: kind.to_string(),
            duration_minutes: 30,
            calories_burned: calories,
            intensity: Intensity::Medium,
            recorded_at: now() - Duration::days(days_ago),
            notes: None,
            updated_at: None,
        }
    }

    fn meal(id: u64, user_id: UserId, days_ago: i64, calories: f64) -> NutritionEntry {
        NutritionEntry {
            id,
            user_id,
            food_name: "Rice Bowl".to_string(),
            calories,
            protein: 20.0,
            carbs: 60.0,
            fat: 10.0,
            meal_type: "lunch".to_string(),
            recorded_at: now() - Duration::days(days_ago),
            updated_at: None,
        }
    }

    #[rstest]
    #[case("week", Period::Week)]
    #[case("MONTH", Period::Month)]
    #[case("year", Period::Year)]
    #[case("fortnight", Period::Week)]
    #[case("", Period::Week)]
    fn test_period_resolve(#[case] input: &str, #[case] expected: Period) {
        assert_eq!(Period::resolve(input), expected);
    }

    #[test]
    fn test_period_strict_parse_rejects_unknown() {
        assert_eq!(
            "decade".parse::<Period>(),
            Err(AnalyticsError::InvalidPeriod("decade".to_string()))
        );
    }

    #[test]
    fn test_generate_month_report() {
        let activities = vec![
            activity(1, 1, "running", 1, 300.0),
            activity(2, 1, "cycling", 10, 400.0),
            activity(3, 1, "running", 45, 999.0),
            activity(4, 2, "yoga", 1, 150.0),
        ];
        let nutrition = vec![meal(1, 1, 1, 600.0), meal(2, 2, 1, 900.0)];
        let assembler = ReportAssembler::new(&activities, &nutrition);

        let report = assembler.generate(1, Period::Month, now()).unwrap();

        assert_eq!(report.report_id, format!("report_1_month_{}", now().timestamp()));
        assert_eq!(report.period, "Monthly");
        assert_eq!(report.date_range.start_date, now() - Duration::days(30));
        assert_eq!(report.date_range.end_date, now());
        assert_eq!(report.summary.total_workouts, 2);
        assert_eq!(report.summary.total_calories_burned, 700.0);
        assert_eq!(report.summary.total_calories_consumed, 600.0);
        assert_eq!(report.activity_breakdown.len(), 2);
        assert_eq!(report.weekly_progress.len(), 7);
        assert_eq!(report.generated_at, now());
    }

    #[test]
    fn test_unknown_period_matches_week() {
        let activities = vec![activity(1, 1, "running", 3, 300.0), activity(2, 1, "running", 9, 300.0)];
        let assembler = ReportAssembler::new(&activities, &[]);

        let fallback = assembler.generate(1, Period::resolve("quarter"), now()).unwrap();
        let week = assembler.generate(1, Period::Week, now()).unwrap();

        assert_eq!(fallback, week);
        assert_eq!(fallback.date_range.start_date, now() - Duration::days(7));
        assert_eq!(fallback.summary.total_workouts, 1);
    }

    #[test]
    fn test_empty_user_report() {
        let assembler = ReportAssembler::new(&[], &[]);
        let report = assembler.generate(42, Period::Year, now()).unwrap();

        assert_eq!(report.summary.total_workouts, 0);
        assert_eq!(report.summary.average_workout_duration, 0.0);
        assert_eq!(report.health_score, 0);
        assert_eq!(report.weekly_progress.len(), 7);
        assert_eq!(report.recommendations[0].priority, Priority::High);
        assert!(report.activity_breakdown.is_empty());
    }

    #[test]
    fn test_non_finite_input_fails_whole_report() {
        let activities = vec![activity(1, 1, "running", 1, f64::NAN)];
        let assembler = ReportAssembler::new(&activities, &[]);

        let result = assembler.generate(1, Period::Week, now());
        assert!(matches!(result, Err(AnalyticsError::Computation(_))));
    }

    #[test]
    fn test_analytics_covers_all_time() {
        let activities = vec![activity(1, 1, "running", 1, 300.0), activity(2, 1, "running", 400, 500.0)];
        let nutrition = vec![meal(1, 1, 2, 2000.0)];
        let analytics = ReportAssembler::new(&activities, &nutrition).analytics(1).unwrap();

        assert_eq!(analytics.total_workouts, 2);
        assert_eq!(analytics.total_calories_burned, 800.0);
        assert_eq!(analytics.net_calories, 1200.0);
        assert_eq!(analytics.period, "current_week");
    }

    #[test]
    fn test_report_serialized_field_names() {
        let assembler = ReportAssembler::new(&[], &[]);
        let json = serde_json::to_value(assembler.generate(1, Period::Week, now()).unwrap()).unwrap();

        for field in [
            "reportId",
            "userId",
            "period",
            "dateRange",
            "summary",
            "dailyAverages",
            "activityBreakdown",
            "weeklyProgress",
            "healthScore",
            "recommendations",
            "chartData",
            "generatedAt",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert!(json["dateRange"].get("startDate").is_some());
    }
}
