//! Configuration types for tip distribution.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{DEFAULT_HOURLY_DEDUCTION, Employee};

/// House-wide settings from `house.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HouseSettings {
    /// Display name of the venue.
    pub name: String,
    /// ISO currency code used on reports (e.g., "ILS").
    pub currency: String,
    /// Hourly deduction applied to employees without a personal rate.
    #[serde(default = "default_hourly_deduction")]
    pub default_hourly_deduction: Decimal,
    /// Number of decimal places payouts are floored to; 0 pays whole units.
    #[serde(default)]
    pub rounding_scale: u32,
}

fn default_hourly_deduction() -> Decimal {
    DEFAULT_HOURLY_DEDUCTION
}

impl Default for HouseSettings {
    fn default() -> Self {
        Self {
            name: "House".to_string(),
            currency: "ILS".to_string(),
            default_hourly_deduction: DEFAULT_HOURLY_DEDUCTION,
            rounding_scale: 0,
        }
    }
}

/// Seed roster file structure (`employees.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// Employees known when the engine starts.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// The complete tip configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct TipConfig {
    house: HouseSettings,
    employees: Vec<Employee>,
}

impl TipConfig {
    /// Creates a new TipConfig from its component parts.
    pub fn new(house: HouseSettings, employees: Vec<Employee>) -> Self {
        Self { house, employees }
    }

    /// Returns the house settings.
    pub fn house(&self) -> &HouseSettings {
        &self.house
    }

    /// Returns the seed employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
