//! Domain types and pure transforms for campus dining status.

mod app_config;
mod config;
pub mod grouping;
pub mod presentation;
pub mod types;

#[cfg(test)]
mod test_fixtures;

use thiserror::Error;

pub use app_config::{AppConfig, DEFAULT_POLL_INTERVAL_MS};
pub use config::{load_app_config, load_app_config_from_env};
pub use grouping::{
    format_label, group_by_label, GroupedLocations, LabelGroup, FALLBACK_LABEL,
};
pub use presentation::{icon_for, StatusIcon, Symbol, Tint};
pub use types::{Address, Location, LocationStatusResponse, StatusInfo};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
