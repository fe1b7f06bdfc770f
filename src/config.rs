use crate::estimation::DEFAULT_MAX_RANGE_MILES;
use crate::maintenance::{MaintenanceTask, default_tasks};
use crate::state::DashboardSettings;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub vehicle: Option<VehicleSection>,
    #[serde(default)]
    pub maintenance: Option<MaintenanceSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSection {
    /// Port to listen on (default: 8080)
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VehicleSection {
    /// Rated full-charge range in miles (default: 300)
    pub max_range_miles: Option<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MaintenanceSection {
    /// Replaces the built-in task list when present
    #[serde(default)]
    pub tasks: Vec<MaintenanceTask>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn load_default() -> Result<Config, ConfigError> {
    load_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<(), ConfigError> {
        Level::from_str(&self.logging.level).map_err(|_| {
            ConfigError::Invalid(format!("unknown logging level: {}", self.logging.level))
        })?;

        let max_range = self.max_range_miles();
        if !max_range.is_finite() || max_range <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "vehicle.max_range_miles must be positive, got {max_range}"
            )));
        }

        if let Some(task) = self
            .maintenance_tasks()
            .iter()
            .find(|task| task.interval_miles == 0)
        {
            return Err(ConfigError::Invalid(format!(
                "maintenance task {} ({}) has a zero interval",
                task.id, task.name
            )));
        }
        Ok(())
    }

    /// Returns the configured log level (default: info)
    pub fn log_level(&self) -> Level {
        Level::from_str(&self.logging.level).unwrap_or(Level::INFO)
    }

    /// Returns the server port (default: 8080)
    pub fn server_port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Returns the rated vehicle range (default: 300 miles)
    pub fn max_range_miles(&self) -> f64 {
        self.vehicle
            .as_ref()
            .and_then(|v| v.max_range_miles)
            .unwrap_or(DEFAULT_MAX_RANGE_MILES)
    }

    /// Returns the configured task list, or the built-in schedule if none is set.
    pub fn maintenance_tasks(&self) -> Vec<MaintenanceTask> {
        match &self.maintenance {
            Some(section) if !section.tasks.is_empty() => section.tasks.clone(),
            _ => default_tasks(),
        }
    }

    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            max_range_miles: self.max_range_miles(),
            maintenance_tasks: self.maintenance_tasks(),
        }
    }
}
