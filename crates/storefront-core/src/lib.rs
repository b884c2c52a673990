mod app_config;
mod config;
pub mod page;
pub mod pipeline;
pub mod products;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use page::{LoadStatus, PageAction, PageState};
pub use pipeline::{derive_listing, FilterSelection, PriceBand, SortKey};
pub use products::{Color, Product};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
