//! Liveness and readiness probes
//!
//! `/health` and `/health/live` answer as long as the process runs.
//! `/health/ready` also reads every collection of the record store and
//! reports how many records it holds.

use crate::repositories::RecordSource;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<StoreCheck>,
}

impl HealthResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            checks: None,
        }
    }
}

/// Outcome of reading the record store
#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub store: StoreStatus,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StoreStatus {
    Healthy { records: RecordCounts },
    Unhealthy { message: String },
}

#[derive(Debug, Serialize)]
pub struct RecordCounts {
    pub users: usize,
    pub activities: usize,
    pub nutrition: usize,
}

impl RecordCounts {
    async fn read<S: RecordSource + ?Sized>(store: &S) -> anyhow::Result<Self> {
        Ok(Self {
            users: store.list_users().await?.len(),
            activities: store.list_activities(None).await?.len(),
            nutrition: store.list_nutrition(None).await?.len(),
        })
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("healthy"))
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("alive"))
}

/// GET /health/ready - 503 when the store cannot be read
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match RecordCounts::read(state.store()).await {
        Ok(records) => (StatusCode::OK, "ready", StoreStatus::Healthy { records }),
        Err(e) => {
            tracing::warn!(error = %e, "Record store unreadable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "not_ready",
                StoreStatus::Unhealthy { message: e.to_string() },
            )
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: VERSION,
            checks: Some(StoreCheck { store }),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_probes() {
        assert_eq!(health_check().await.status, "healthy");
        assert_eq!(liveness_check().await.status, "alive");
        assert!(!liveness_check().await.version.is_empty());
    }

    #[test]
    fn test_store_status_shape() {
        let healthy = StoreStatus::Healthy {
            records: RecordCounts {
                users: 2,
                activities: 7,
                nutrition: 3,
            },
        };
        let value = serde_json::to_value(&healthy).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["records"]["activities"], 7);

        let unhealthy = StoreStatus::Unhealthy {
            message: "lock poisoned".to_string(),
        };
        assert_eq!(serde_json::to_value(&unhealthy).unwrap()["status"], "unhealthy");
    }
}
