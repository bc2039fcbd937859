//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::repositories::HealthStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
///
/// All fields are behind `Arc` (or are handles), so cloning per request is
/// cheap.
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: Arc<dyn HealthStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prometheus render handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn HealthStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle served on `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the record store
    #[inline]
    pub fn store(&self) -> &dyn HealthStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
