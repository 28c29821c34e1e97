//! Configuration loading and management for the Tip Distribution Engine.
//!
//! This module loads house settings (default hourly deduction, payout
//! rounding scale) and an optional seed roster from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use tip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/house").unwrap();
//! println!("Default deduction: {}", config.house().default_hourly_deduction);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeesConfig, HouseSettings, TipConfig};
