//! Application state for the Tip Distribution Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{ConfigLoader, HouseSettings};
use crate::directory::EmployeeDirectory;
use crate::ledger::ShiftLedger;

/// Shared application state.
///
/// Holds the loaded house configuration, the employee directory seeded from
/// it, and the shift ledger.
#[derive(Clone)]
pub struct AppState {
    /// The loaded house configuration.
    config: Arc<ConfigLoader>,
    /// Every employee the house has registered.
    directory: Arc<RwLock<EmployeeDirectory>>,
    /// Finalized shifts.
    ledger: Arc<ShiftLedger>,
}

impl AppState {
    /// Creates a new application state with an empty in-memory ledger and a
    /// directory seeded from the configuration's employee roster.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_ledger(config, ShiftLedger::in_memory())
    }

    /// Creates a new application state over an existing ledger.
    pub fn with_ledger(config: ConfigLoader, ledger: ShiftLedger) -> Self {
        let directory = EmployeeDirectory::from_seed(config.config().employees().to_vec());
        Self {
            config: Arc::new(config),
            directory: Arc::new(RwLock::new(directory)),
            ledger: Arc::new(ledger),
        }
    }

    /// Returns the house settings.
    pub fn house(&self) -> &HouseSettings {
        self.config.house()
    }

    /// Returns the shared employee directory.
    pub fn directory(&self) -> &RwLock<EmployeeDirectory> {
        &self.directory
    }

    /// Returns the shift ledger.
    pub fn ledger(&self) -> &ShiftLedger {
        &self.ledger
    }
}
