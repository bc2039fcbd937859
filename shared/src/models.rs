//! Data models for the Strive Hive application
//!
//! Profiles and records are owned by the store; the analytics core only ever
//! reads them. Updates are shallow merges where a provided value wins and an
//! absent one keeps the stored value.

use crate::health_metrics::{calculate_calorie_goal, derive_metrics, mifflin_st_jeor, HealthStatus};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier
pub type UserId = u64;

/// Activity / nutrition record identifier
pub type RecordId = u64;

// ============================================================================
// Enumerations
// ============================================================================

/// Gender used for the BMR equation
///
/// Parsed case-insensitively; anything that is not `male` or `female`
/// becomes `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        Gender::parse(&value)
    }
}

/// Workout effort tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

impl Intensity {
    /// Parse an intensity label, case-insensitive
    ///
    /// `moderate` is an alias of medium and `vigorous` of high. Unknown
    /// labels fall back to medium.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Intensity::Low,
            "high" | "vigorous" => Intensity::High,
            _ => Intensity::Medium,
        }
    }

    /// Numeric effort on the 1-3 scale
    pub fn score(&self) -> f64 {
        match self {
            Intensity::Low => 1.0,
            Intensity::Medium => 2.0,
            Intensity::High => 3.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

impl From<String> for Intensity {
    fn from(value: String) -> Self {
        Intensity::parse(&value)
    }
}

/// TDEE multiplier when no activity level is known
pub const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.55;

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    Active,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// BMR multiplier for total daily energy expenditure
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive | ActivityLevel::Active => DEFAULT_ACTIVITY_MULTIPLIER,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }
}

/// Fitness goal chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    WeightGain,
    Maintain,
    MuscleGain,
}

impl FitnessGoal {
    /// Daily kcal surplus (positive) or deficit (negative)
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            FitnessGoal::WeightLoss => -500.0,
            FitnessGoal::WeightGain => 500.0,
            FitnessGoal::MuscleGain => 300.0,
            FitnessGoal::Maintain => 0.0,
        }
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// User profile with derived body metrics
///
/// `bmi`, `bmr` and `health_status` are never set directly; they follow
/// from height, weight, age and gender. `estimated_calorie_goal` is only
/// present when the user has not set `calorie_goal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: u32,
    #[serde(rename = "height")]
    pub height_cm: f64,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<FitnessGoal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_goal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    pub bmr: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<HealthStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_calorie_goal: Option<i64>,
}

/// Input for creating a user profile
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: Gender,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<u32>,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    pub weight_goal: Option<f64>,
    pub calorie_goal: Option<u32>,
}

impl UserProfile {
    /// Build a profile from creation input, computing derived metrics
    pub fn create(id: UserId, input: NewUser, now: DateTime<Utc>) -> Self {
        let mut profile = Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
            height_cm: input.height_cm,
            weight_kg: input.weight_kg,
            gender: input.gender,
            activity_level: input.activity_level,
            fitness_goal: input.fitness_goal,
            weight_goal: input.weight_goal,
            calorie_goal: input.calorie_goal,
            created_at: now,
            updated_at: now,
            bmi: None,
            bmr: 0,
            health_status: None,
            estimated_calorie_goal: None,
        };
        profile.refresh_derived_metrics();
        profile
    }

    /// Merge an update into the profile and recompute derived metrics
    pub fn apply(&mut self, update: UserUpdate, now: DateTime<Utc>) {
        merge(&mut self.name, update.name);
        merge(&mut self.email, update.email);
        merge(&mut self.age, update.age);
        merge(&mut self.height_cm, update.height_cm);
        merge(&mut self.weight_kg, update.weight_kg);
        merge(&mut self.gender, update.gender);
        merge_optional(&mut self.activity_level, update.activity_level);
        merge_optional(&mut self.fitness_goal, update.fitness_goal);
        merge_optional(&mut self.weight_goal, update.weight_goal);
        merge_optional(&mut self.calorie_goal, update.calorie_goal);
        self.updated_at = now;
        self.refresh_derived_metrics();
    }

    /// Recompute BMI, BMR, health status and the estimated calorie goal
    pub fn refresh_derived_metrics(&mut self) {
        let metrics = derive_metrics(self.height_cm, self.weight_kg, self.age, self.gender);
        self.bmi = metrics.bmi;
        self.bmr = metrics.bmr;
        self.health_status = metrics.health_status;
        self.estimated_calorie_goal = match self.calorie_goal {
            Some(_) => None,
            None => {
                let bmr = mifflin_st_jeor(self.weight_kg, self.height_cm, self.age, self.gender);
                Some(calculate_calorie_goal(bmr, self.activity_level, self.fitness_goal))
            }
        };
    }
}

// ============================================================================
// Activity Records
// ============================================================================

/// A logged exercise activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub activity_type: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub calories_burned: f64,
    #[serde(default)]
    pub intensity: Intensity,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for logging an activity
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub user_id: UserId,
    pub activity_type: String,
    pub duration_minutes: u32,
    pub calories_burned: f64,
    pub intensity: Intensity,
    pub recorded_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Partial activity update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityUpdate {
    pub activity_type: Option<String>,
    pub duration_minutes: Option<u32>,
    pub calories_burned: Option<f64>,
    pub intensity: Option<Intensity>,
    pub recorded_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl ActivityRecord {
    /// Build a record; a missing timestamp defaults to `now`
    pub fn create(id: RecordId, input: NewActivity, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: input.user_id,
            activity_type: input.activity_type,
            duration_minutes: input.duration_minutes,
            calories_burned: input.calories_burned,
            intensity: input.intensity,
            recorded_at: input.recorded_at.unwrap_or(now),
            notes: input.notes,
            updated_at: None,
        }
    }

    /// Merge an update into the record. Id and owner never change.
    pub fn apply(&mut self, update: ActivityUpdate, now: DateTime<Utc>) {
        merge(&mut self.activity_type, update.activity_type);
        merge(&mut self.duration_minutes, update.duration_minutes);
        merge(&mut self.calories_burned, update.calories_burned);
        merge(&mut self.intensity, update.intensity);
        merge(&mut self.recorded_at, update.recorded_at);
        merge_optional(&mut self.notes, update.notes);
        self.updated_at = Some(now);
    }

    /// Calendar date (UTC) the activity was recorded on
    pub fn date(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }
}

/// Activity payload in the older field naming (`activityName`, `date`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyActivity {
    pub user_id: UserId,
    pub activity_name: String,
    pub duration: u32,
    pub calories_burned: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl From<LegacyActivity> for NewActivity {
    fn from(legacy: LegacyActivity) -> Self {
        NewActivity {
            user_id: legacy.user_id,
            activity_type: legacy.activity_name,
            duration_minutes: legacy.duration,
            calories_burned: legacy.calories_burned,
            intensity: Intensity::default(),
            recorded_at: legacy
                .date
                .map(|date| date.and_time(NaiveTime::MIN).and_utc()),
            notes: None,
        }
    }
}

// ============================================================================
// Nutrition Entries
// ============================================================================

/// A logged food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionEntry {
    pub id: RecordId,
    pub user_id: UserId,
    pub food_name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    pub meal_type: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for logging a nutrition entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewNutritionEntry {
    pub user_id: UserId,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_type: String,
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Partial nutrition update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionUpdate {
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub meal_type: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl NutritionEntry {
    pub fn create(id: RecordId, input: NewNutritionEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: input.user_id,
            food_name: input.food_name,
            calories: input.calories,
            protein: input.protein,
            carbs: input.carbs,
            fat: input.fat,
            meal_type: input.meal_type,
            recorded_at: input.recorded_at.unwrap_or(now),
            updated_at: None,
        }
    }

    pub fn apply(&mut self, update: NutritionUpdate, now: DateTime<Utc>) {
        merge(&mut self.food_name, update.food_name);
        merge(&mut self.calories, update.calories);
        merge(&mut self.protein, update.protein);
        merge(&mut self.carbs, update.carbs);
        merge(&mut self.fat, update.fat);
        merge(&mut self.meal_type, update.meal_type);
        merge(&mut self.recorded_at, update.recorded_at);
        self.updated_at = Some(now);
    }
}

fn merge<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn merge_optional<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap()
    }

    fn new_john() -> NewUser {
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
        }
    }

    fn john() -> UserProfile {
        UserProfile::create(1, new_john(), now())
    }

    #[test]
    fn test_create_profile_computes_metrics() {
        let profile = john();
        assert_eq!(profile.bmi, Some(22.9));
        assert_eq!(profile.bmr, 1659);
        assert_eq!(profile.health_status, Some(HealthStatus::Normal));
    }

    #[test]
    fn test_estimated_calorie_goal_only_without_explicit_goal() {
        let profile = john();
        assert_eq!(profile.estimated_calorie_goal, None);
        assert!(serde_json::to_value(&profile).unwrap().get("estimatedCalorieGoal").is_none());

        let mut profile = UserProfile::create(2, NewUser { calorie_goal: None, ..new_john() }, now());
        // 1658.75 × 1.55 - 500
        assert_eq!(profile.estimated_calorie_goal, Some(2071));

        profile.apply(
            UserUpdate {
                activity_level: Some(ActivityLevel::ExtremelyActive),
                fitness_goal: Some(FitnessGoal::Maintain),
                ..Default::default()
            },
            now(),
        );
        // 1658.75 × 1.9
        assert_eq!(profile.estimated_calorie_goal, Some(3152));
        assert_eq!(serde_json::to_value(&profile).unwrap()["estimatedCalorieGoal"], 3152);
    }

    #[rstest]
    #[case("\"sedentary\"", ActivityLevel::Sedentary)]
    #[case("\"very_active\"", ActivityLevel::VeryActive)]
    #[case("\"extremely_active\"", ActivityLevel::ExtremelyActive)]
    fn test_activity_level_names(#[case] json: &str, #[case] expected: ActivityLevel) {
        assert_eq!(serde_json::from_str::<ActivityLevel>(json).unwrap(), expected);
    }

    #[test]
    fn test_update_merges_and_recomputes() {
        let mut profile = john();
        let later = now() + chrono::Duration::days(1);
        profile.apply(
            UserUpdate {
                weight_kg: Some(95.0),
                ..Default::default()
            },
            later,
        );

        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.height_cm, 175.0);
        assert_eq!(profile.calorie_goal, Some(2200));
        assert_eq!(profile.bmi, Some(31.0));
        assert_eq!(profile.health_status, Some(HealthStatus::Obese));
        assert_eq!(profile.updated_at, later);
        assert_eq!(profile.created_at, now());
    }

    #[test]
    fn test_zero_height_drops_bmi() {
        let mut profile = john();
        profile.apply(
            UserUpdate {
                height_cm: Some(0.0),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(profile.bmi, None);
        assert_eq!(profile.health_status, None);

        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("bmi").is_none());
        assert!(json.get("healthStatus").is_none());
    }

    #[rstest]
    #[case("low", Intensity::Low)]
    #[case("LOW", Intensity::Low)]
    #[case("Medium", Intensity::Medium)]
    #[case("moderate", Intensity::Medium)]
    #[case("HIGH", Intensity::High)]
    #[case("vigorous", Intensity::High)]
    #[case("extreme", Intensity::Medium)]
    fn test_intensity_parse(#[case] input: &str, #[case] expected: Intensity) {
        assert_eq!(Intensity::parse(input), expected);
    }

    #[test]
    fn test_activity_intensity_defaults_to_medium() {
        let json = r#"{
            "id": 7,
            "userId": 1,
            "activityType": "running",
            "duration": 30,
            "caloriesBurned": 300,
            "recordedAt": "2024-10-01T07:00:00Z"
        }"#;
        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.intensity, Intensity::Medium);
        assert_eq!(record.duration_minutes, 30);

        let json = json.replace("\"duration\"", "\"intensity\": \"High\", \"duration\"");
        let record: ActivityRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.intensity, Intensity::High);
    }

    #[test]
    fn test_gender_parse_falls_back_to_other() {
        assert_eq!(Gender::parse("MALE"), Gender::Male);
        assert_eq!(Gender::parse("Female"), Gender::Female);
        assert_eq!(Gender::parse("non-binary"), Gender::Other);
        assert_eq!(serde_json::to_string(&Gender::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn test_activity_update_keeps_owner() {
        let mut record = ActivityRecord::create(
            3,
            NewActivity {
                user_id: 1,
                activity_type: "running".to_string(),
                duration_minutes: 30,
                calories_burned: 300.0,
                intensity: Intensity::Medium,
                recorded_at: None,
                notes: Some("Morning run".to_string()),
            },
            now(),
        );
        assert_eq!(record.recorded_at, now());

        record.apply(
            ActivityUpdate {
                duration_minutes: Some(45),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(record.id, 3);
        assert_eq!(record.user_id, 1);
        assert_eq!(record.duration_minutes, 45);
        assert_eq!(record.calories_burned, 300.0);
        assert_eq!(record.notes.as_deref(), Some("Morning run"));
        assert_eq!(record.updated_at, Some(now()));
    }

    #[test]
    fn test_legacy_activity_translation() {
        let legacy: LegacyActivity = serde_json::from_str(
            r#"{"userId": 2, "activityName": "Yoga", "duration": 60, "caloriesBurned": 180, "date": "2024-01-16"}"#,
        )
        .unwrap();
        let input = NewActivity::from(legacy);

        assert_eq!(input.activity_type, "Yoga");
        assert_eq!(input.duration_minutes, 60);
        assert_eq!(input.intensity, Intensity::Medium);
        assert_eq!(
            input.recorded_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 16, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_nutrition_update_merges() {
        let mut entry = NutritionEntry::create(
            1,
            NewNutritionEntry {
                user_id: 1,
                food_name: "Chicken Salad".to_string(),
                calories: 350.0,
                protein: 25.0,
                carbs: 15.0,
                fat: 12.0,
                meal_type: "lunch".to_string(),
                recorded_at: None,
            },
            now(),
        );
        entry.apply(
            NutritionUpdate {
                calories: Some(420.0),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(entry.calories, 420.0);
        assert_eq!(entry.food_name, "Chicken Salad");
        assert_eq!(entry.protein, 25.0);
    }
}
