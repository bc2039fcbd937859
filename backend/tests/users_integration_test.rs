//! Integration tests for user profile endpoints

mod common;

use axum::http::StatusCode;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::json;

#[tokio::test]
async fn test_create_user_derives_metrics() {
    let app = common::TestApp::new();
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    let (status, body) = app
        .post(
            "/api/v1/users",
            &json!({
                "name": name,
                "email": email,
                "age": 30,
                "height": 175,
                "weight": 70,
                "gender": "male"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], name);
    assert_eq!(body["bmi"], 22.9);
    assert_eq!(body["bmr"], 1649);
    assert_eq!(body["healthStatus"], "normal");
}

#[tokio::test]
async fn test_create_user_estimates_calorie_goal() {
    let app = common::TestApp::new();
    let email: String = SafeEmail().fake();

    let (status, body) = app
        .post(
            "/api/v1/users",
            &json!({
                "name": "Alex",
                "email": email,
                "age": 30,
                "height": 175,
                "weight": 70,
                "gender": "male",
                "activityLevel": "extremely_active",
                "fitnessGoal": "weight_gain"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["activityLevel"], "extremely_active");
    // 1648.75 × 1.9 + 500
    assert_eq!(body["estimatedCalorieGoal"], 3633);

    let id = body["id"].as_u64().unwrap();
    let (status, body) = app
        .put(&format!("/api/v1/users/{}", id), &json!({ "calorieGoal": 2500 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["calorieGoal"], 2500);
    assert!(body.get("estimatedCalorieGoal").is_none());
}

#[tokio::test]
async fn test_create_user_applies_defaults() {
    let app = common::TestApp::new();

    let (status, body) = app
        .post("/api/v1/users", &json!({ "name": "Sam", "email": "sam@example.com" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["age"], 25);
    assert_eq!(body["gender"], "male");
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = common::TestApp::new();
    let email: String = SafeEmail().fake();
    let body = json!({ "name": "First", "email": email });

    let (first, _) = app.post("/api/v1/users", &body).await;
    let (second, error) = app.post("/api/v1/users", &body).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert!(error["error"]["message"].is_string());
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let app = common::TestApp::new();

    let (status, _) = app
        .post("/api/v1/users", &json!({ "name": "Sam", "email": "not-an-email" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_recomputes_metrics() {
    let app = common::TestApp::new();
    let id = app.create_user().await;

    let (status, body) = app
        .put(&format!("/api/v1/users/{}", id), &json!({ "weight": 90 }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weight"], 90.0);
    assert_eq!(body["healthStatus"], "overweight");
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let app = common::TestApp::new();

    let (get_status, _) = app.get("/api/v1/users/42").await;
    let (put_status, _) = app.put("/api/v1/users/42", &json!({ "age": 40 })).await;
    let (delete_status, _) = app.delete("/api/v1/users/42").await;

    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(put_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_deleted_user() {
    let app = common::TestApp::new();
    let id = app.create_user().await;

    let (status, body) = app.delete(&format!("/api/v1/users/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedUser"]["id"], id);

    let (status, list) = app.get_json("/api/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 0);
}
