pub mod app_config;
pub mod categories;
pub mod config;
pub mod coordinate;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, OutputMode};
pub use categories::{Category, CategoryGroup, TagPredicate, UnknownCategory};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{haversine_km, Coordinate, CoordinateError, EARTH_RADIUS_KM};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
