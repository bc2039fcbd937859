//! Common test utilities for integration tests
//!
//! Each test gets its own router over a fresh in-memory store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use std::sync::Arc;
use strive_hive_backend::{
    config::AppConfig,
    repositories::{seed::SampleData, InMemoryStore},
    routes,
    state::AppState,
};
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Application over an empty store
    pub fn new() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    /// Application over the demo dataset
    pub fn seeded() -> Self {
        Self::with_store(InMemoryStore::with_data(SampleData::generate(Utc::now())))
    }

    fn with_store(store: InMemoryStore) -> Self {
        let state = AppState::new(Arc::new(store), test_config());
        Self {
            app: routes::create_router(state),
        }
    }

    async fn send(&self, method: &str, path: &str, body: Option<&Value>) -> (StatusCode, String) {
        let (status, _, body) = self.send_raw(method, path, body).await;
        (status, body)
    }

    async fn send_raw(&self, method: &str, path: &str, body: Option<&Value>) -> (StatusCode, HeaderMap, String) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, headers, body_str)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None).await
    }

    /// Make a GET request, keeping the response headers
    pub async fn get_with_headers(&self, path: &str) -> (StatusCode, HeaderMap, String) {
        self.send_raw("GET", path, None).await
    }

    /// Make a GET request and parse the JSON body
    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(path).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let (status, body) = self.send("POST", path, Some(body)).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    /// Make a PUT request with JSON body
    pub async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let (status, body) = self.send("PUT", path, Some(body)).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let (status, body) = self.send("DELETE", path, None).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    /// Create a user with a generated name and email, returning its id
    pub async fn create_user(&self) -> u64 {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        let (status, body) = self
            .post(
                "/api/v1/users",
                &json!({
                    "name": name,
                    "email": email,
                    "age": 30,
                    "height": 180,
                    "weight": 75,
                    "gender": "male"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_u64().unwrap()
    }
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.server.port = 0;
    config.store.seed_sample_data = false;
    config
}
