//! Shared domain types and configuration for the property dossier service.

pub mod app_config;
pub mod config;
pub mod dossier;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dossier::{
    BudgetTier, Dossier, IntelCategory, IntelIcon, IntelPoint, RawSource, SourceEntry,
    Summary, MAX_RAW_SOURCES,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
