//! Configuration management for the Strive Hive backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: SH__)

use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub share: ShareConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Share link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    pub base_url: String,
    pub short_base_url: String,
    pub expiry_days: i64,
}

impl ShareConfig {
    pub fn expiry(&self) -> Duration {
        Duration::days(self.expiry_days)
    }
}

/// Report export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub download_prefix: String,
    pub expiry_hours: i64,
}

impl ExportConfig {
    pub fn expiry(&self) -> Duration {
        Duration::hours(self.expiry_hours)
    }
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Load the demo users and records at startup
    pub seed_sample_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed_sample_data: true }
    }
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
            },
            share: ShareConfig {
                base_url: "https://strivehive.app".to_string(),
                short_base_url: "https://s.hive".to_string(),
                expiry_days: 7,
            },
            export: ExportConfig {
                download_prefix: "/downloads".to_string(),
                expiry_hours: 24,
            },
            store: StoreConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with SH__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., SH__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("SH").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.share.expiry(), Duration::days(7));
        assert_eq!(config.export.expiry(), Duration::hours(24));
        assert!(config.store.seed_sample_data);
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.share.base_url, "https://strivehive.app");
        assert_eq!(config.export.download_prefix, "/downloads");
    }
}
