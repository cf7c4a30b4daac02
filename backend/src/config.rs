//! Configuration management for the Fertilizer Manager
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with FM_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::services::analytics::{DEFAULT_RECENT_SALES, DEFAULT_REVENUE_DAYS, DEFAULT_TOP_PRODUCTS};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Where the stock and sales collections live
    pub storage: StorageConfig,

    /// Dashboard sizing
    pub dashboard: DashboardConfig,
}

/// Storage backend selection
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing persisted across runs
    Memory,
    /// `<data_dir>/<collection>.json`
    Json,
    /// `<data_dir>/fertilizer.redb`
    Redb,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Directory holding the data files
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn redb_path(&self) -> PathBuf {
        self.data_dir.join("fertilizer.redb")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Number of sales listed as recent
    pub recent_sales: usize,

    /// Length of the daily revenue chart
    pub revenue_days: u32,

    /// Number of products in the best-seller list
    pub top_products: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("FM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("storage.backend", "json")?
            .set_default("storage.data_dir", "./data")?
            .set_default("dashboard.recent_sales", DEFAULT_RECENT_SALES as i64)?
            .set_default("dashboard.revenue_days", i64::from(DEFAULT_REVENUE_DAYS))?
            .set_default("dashboard.top_products", DEFAULT_TOP_PRODUCTS as i64)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FM_ prefix)
            .add_source(
                Environment::with_prefix("FM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_sales: DEFAULT_RECENT_SALES,
            revenue_days: DEFAULT_REVENUE_DAYS,
            top_products: DEFAULT_TOP_PRODUCTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = Config::load().unwrap();
        assert_eq!(config.dashboard.revenue_days, 7);
        assert_eq!(config.dashboard.recent_sales, 5);
        assert_eq!(config.dashboard.top_products, 5);
    }

    #[test]
    fn test_default_data_dir() {
        assert_eq!(StorageConfig::default().data_dir, PathBuf::from("./data"));
        assert_eq!(StorageConfig::default().backend, StorageBackend::Json);
    }

    #[test]
    fn test_redb_path() {
        let storage = StorageConfig {
            backend: StorageBackend::Redb,
            data_dir: PathBuf::from("/var/lib/shop"),
        };
        assert_eq!(storage.redb_path(), PathBuf::from("/var/lib/shop/fertilizer.redb"));
    }
}
