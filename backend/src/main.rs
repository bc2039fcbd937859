//! Strive Hive Backend
//!
//! Serves profiles, activity and nutrition logs, and the reports derived
//! from them. Records live in process memory and are lost on restart.

use anyhow::Result;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use strive_hive_backend::{
    config::AppConfig,
    repositories::{seed::SampleData, InMemoryStore},
    routes,
    state::AppState,
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production,
        "Starting Strive Hive Backend"
    );
    if production {
        check_production_config(&config);
    }

    let mut state = AppState::new(Arc::new(build_store(&config)), config.clone());
    if config.metrics.enabled {
        state = state.with_metrics(PrometheusBuilder::new().install_recorder()?);
        info!("Prometheus metrics enabled at /metrics");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, routes::create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Empty store, or the demo dataset when `store.seed_sample_data` is set
fn build_store(config: &AppConfig) -> InMemoryStore {
    if !config.store.seed_sample_data {
        return InMemoryStore::new();
    }

    let data = SampleData::generate(Utc::now());
    info!(
        users = data.users.len(),
        activities = data.activities.len(),
        nutrition = data.nutrition.len(),
        "Seeding sample data"
    );
    InMemoryStore::with_data(data)
}

/// Warn about settings that only make sense during development
fn check_production_config(config: &AppConfig) {
    if config.store.seed_sample_data {
        warn!("Sample data is enabled in production");
    }
    if !config.share.base_url.starts_with("https://") {
        warn!(base_url = %config.share.base_url, "Share links are not served over HTTPS");
    }
}

/// JSON logs in production, pretty logs otherwise; `RUST_LOG` overrides the filter
fn init_tracing(production: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if production {
            "strive_hive_backend=info,tower_http=info".into()
        } else {
            "strive_hive_backend=debug,tower_http=debug".into()
        }
    });

    let registry = tracing_subscriber::registry().with(env_filter);
    if production {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
