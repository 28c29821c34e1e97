//! Calculation logic for the Tip Distribution Engine.
//!
//! This module contains the pure, synchronous parts of the engine: strict
//! parsing of form inputs, register reconciliation, proportional floor
//! allocation, and the end-to-end shift calculation that combines them.
//! None of it performs I/O or keeps state between calls.

mod allocation;
mod input;
mod reconciliation;
mod shift_calculator;

pub use allocation::{AllocationResult, TipShare, allocate, allocate_with_scale, validate_roster};
pub use input::{ensure_non_negative, parse_amount, parse_hours};
pub use reconciliation::{DeductionLine, ReconciliationResult, reconcile};
pub use shift_calculator::{RosterPolicy, calculate_shift};
