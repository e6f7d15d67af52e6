pub mod app_config;
pub mod config;
pub mod locations;
pub mod platform;
pub mod products;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use locations::{ConfirmedLocation, Coordinates, LocationSearch, LocationSuggestion};
pub use platform::Platform;
pub use products::{NormalizedProduct, Price, ProductPage, Rating};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
