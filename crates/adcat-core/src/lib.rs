pub mod ads;
pub mod app_config;
pub mod config;
pub mod filters;
pub mod stats;

use thiserror::Error;

pub use ads::{Ad, AdStatus, AssetCategory, AssetType};
pub use app_config::{AppConfig, AssetRootsConfig, DeploymentLayout, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::AdFilters;
pub use stats::{AdStats, DateCount, STATS_DATE_LIMIT};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid ad status: {0}")]
    InvalidStatus(String),
    #[error("invalid asset category: {0}")]
    InvalidAssetCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
