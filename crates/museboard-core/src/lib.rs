pub mod ads;
pub mod app_config;
pub mod config;

pub use ads::{
    generate_ad_copy, AdCategory, AdCopy, DEFAULT_CATEGORY, DEFAULT_FORMAT, DEFAULT_TONE,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
