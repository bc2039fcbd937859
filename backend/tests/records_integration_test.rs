//! Integration tests for activity and nutrition logging

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_log_activity_current_fields() {
    let app = common::TestApp::new();
    let user_id = app.create_user().await;

    let (status, body) = app
        .post(
            "/api/v1/activities",
            &json!({
                "userId": user_id,
                "activityType": "cycling",
                "duration": 45,
                "caloriesBurned": 400,
                "intensity": "high",
                "recordedAt": "2024-10-01T07:00:00Z"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["activityType"], "cycling");
    assert_eq!(body["duration"], 45);
    assert_eq!(body["intensity"], "high");
}

#[tokio::test]
async fn test_log_activity_legacy_fields() {
    let app = common::TestApp::new();
    let user_id = app.create_user().await;

    let (status, body) = app
        .post(
            "/api/v1/activities",
            &json!({
                "userId": user_id,
                "activityName": "Yoga",
                "duration": 60,
                "caloriesBurned": 180,
                "date": "2024-01-16"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["activityType"], "Yoga");
    assert_eq!(body["intensity"], "medium");
}

#[tokio::test]
async fn test_activity_filter_and_delete() {
    let app = common::TestApp::seeded();

    let (status, mine) = app.get_json("/api/v1/activities?userId=2").await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap().clone();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|a| a["userId"] == 2));

    let id = mine[0]["id"].as_u64().unwrap();
    let (status, body) = app.delete(&format!("/api/v1/activities/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedActivity"]["id"], id);

    let (status, _) = app.delete(&format!("/api/v1/activities/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_activity_merges_fields() {
    let app = common::TestApp::seeded();

    let (status, body) = app
        .put("/api/v1/activities/1", &json!({ "duration": 50 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], 50);
    assert_eq!(body["userId"], 1);
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_log_nutrition_defaults_macros() {
    let app = common::TestApp::new();
    let user_id = app.create_user().await;

    let (status, body) = app
        .post(
            "/api/v1/nutrition",
            &json!({
                "userId": user_id,
                "foodName": "Apple",
                "calories": 95,
                "mealType": "snack"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["foodName"], "Apple");
    assert_eq!(body["protein"], 0.0);
}

#[tokio::test]
async fn test_negative_nutrition_rejected() {
    let app = common::TestApp::new();

    let (status, _) = app
        .post(
            "/api/v1/nutrition",
            &json!({
                "userId": 1,
                "foodName": "Mystery",
                "calories": -10,
                "mealType": "lunch"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analytics_for_seeded_user() {
    let app = common::TestApp::seeded();

    let (status, body) = app.get_json("/api/v1/analytics/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], 1);
    assert_eq!(body["totalWorkouts"], 5);
    assert_eq!(body["totalCaloriesBurned"], 1650.0);
}

#[tokio::test]
async fn test_analytics_for_unknown_user_is_empty() {
    let app = common::TestApp::new();

    let (status, body) = app.get_json("/api/v1/analytics/99").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalWorkouts"], 0);
    assert_eq!(body["netCalories"], 0.0);
}
