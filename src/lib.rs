//! Tip Distribution Engine
//!
//! This crate computes how one shift's pooled gratuities are divided among
//! the employees who worked it. Card tips fund each employee's guaranteed
//! hourly deduction, any shortfall is taken from the cash register, and the
//! resulting pool is split in proportion to hours worked, floored to whole
//! currency units with the remainder reported as leftover. Finalized shifts
//! are kept in a ledger with one shift per calendar date and can be rolled up
//! into per-employee and monthly reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod directory;
pub mod error;
pub mod ledger;
pub mod models;
