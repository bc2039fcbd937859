//! Report data download service
//!
//! Supports two bodies for a user's monthly window:
//! - CSV: an `Activities` section followed by a `Nutrition` section
//! - JSON: the monthly report, pretty printed

use crate::error::ApiError;
use crate::repositories::RecordSource;
use crate::services::report::ReportService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use strive_hive_shared::{Period, UserId};

const ACTIVITY_HEADERS: [&str; 5] = ["Date", "Type", "Duration (min)", "Calories Burned", "Notes"];
const NUTRITION_HEADERS: [&str; 7] = [
    "Date",
    "Meal Type",
    "Food",
    "Calories",
    "Protein (g)",
    "Carbs (g)",
    "Fat (g)",
];

#[derive(Debug, Serialize)]
struct ActivityCsvRow {
    date: String,
    activity_type: String,
    duration: u32,
    calories_burned: f64,
    notes: String,
}

#[derive(Debug, Serialize)]
struct NutritionCsvRow {
    date: String,
    meal_type: String,
    food: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

/// Export service for downloadable report bodies
pub struct ExportService;

impl ExportService {
    /// Activities and nutrition entries from the last 30 days as CSV
    pub async fn report_csv<S: RecordSource + ?Sized>(
        store: &S,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        let start = Period::Month.start(now);

        let activities: Vec<ActivityCsvRow> = store
            .list_activities(Some(user_id))
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .filter(|a| a.recorded_at >= start)
            .map(|a| ActivityCsvRow {
                date: a.recorded_at.format("%Y-%m-%d").to_string(),
                activity_type: a.activity_type,
                duration: a.duration_minutes,
                calories_burned: a.calories_burned,
                notes: a.notes.unwrap_or_default(),
            })
            .collect();

        let nutrition: Vec<NutritionCsvRow> = store
            .list_nutrition(Some(user_id))
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .filter(|n| n.recorded_at >= start)
            .map(|n| NutritionCsvRow {
                date: n.recorded_at.format("%Y-%m-%d").to_string(),
                meal_type: n.meal_type,
                food: n.food_name,
                calories: n.calories,
                protein: n.protein,
                carbs: n.carbs,
                fat: n.fat,
            })
            .collect();

        let activity_section = Self::to_csv("Activities", &ACTIVITY_HEADERS, &activities)?;
        let nutrition_section = Self::to_csv("Nutrition", &NUTRITION_HEADERS, &nutrition)?;
        Ok(format!("{}\n{}", activity_section, nutrition_section))
    }

    /// The monthly report as pretty JSON
    pub async fn report_json<S: RecordSource + ?Sized>(
        store: &S,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        let report = ReportService::generate(store, user_id, Period::Month, now).await?;
        serde_json::to_string_pretty(&report)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("JSON serialization error: {}", e)))
    }

    /// Convert one titled section to CSV
    fn to_csv<T: Serialize>(title: &str, headers: &[&str], rows: &[T]) -> Result<String, ApiError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(vec![]);

        wtr.write_record([title])
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV write error: {}", e)))?;
        wtr.write_record(headers)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV write error: {}", e)))?;
        for row in rows {
            wtr.serialize(row)
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
