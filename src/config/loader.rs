//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tip
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EmployeesConfig, HouseSettings, TipConfig};

/// Loads and provides access to tip configuration.
///
/// # Directory Structure
///
/// ```text
/// config/house/
/// ├── house.yaml      # Venue name, currency, deduction default, rounding
/// └── employees.yaml  # Optional seed roster
/// ```
///
/// # Example
///
/// ```no_run
/// use tip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/house").unwrap();
/// println!("Loaded house: {}", loader.house().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TipConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `house.yaml` is missing, if any file contains
    /// invalid YAML, or if a configured amount is negative.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let house_path = path.join("house.yaml");
        let house = Self::load_yaml::<HouseSettings>(&house_path)?;
        Self::validate_house(&house, &house_path)?;

        // The seed roster is optional; an absent file means an empty directory.
        let employees_path = path.join("employees.yaml");
        let employees = if employees_path.exists() {
            Self::load_yaml::<EmployeesConfig>(&employees_path)?.employees
        } else {
            Vec::new()
        };

        debug!(
            house = %house.name,
            employees = employees.len(),
            "Loaded tip configuration"
        );

        Ok(Self {
            config: TipConfig::new(house, employees),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: TipConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_house(house: &HouseSettings, path: &Path) -> EngineResult<()> {
        if house.default_hourly_deduction < Decimal::ZERO {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: "default_hourly_deduction must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying tip configuration.
    pub fn config(&self) -> &TipConfig {
        &self.config
    }

    /// Returns the house settings.
    pub fn house(&self) -> &HouseSettings {
        self.config.house()
    }
}
