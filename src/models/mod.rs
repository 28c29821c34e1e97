//! Core data models for the Tip Distribution Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod report;
mod shift;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, ShiftCalculation};
pub use employee::{DEFAULT_HOURLY_DEDUCTION, Employee, NewEmployee, Role};
pub use report::{
    EmployeeMonthlySummary, EmployeePeriodReport, EmployeeShiftLine, MonthlyReport,
    MonthlyTotals,
};
pub use shift::{RosterEntry, Shift, ShiftAllocation, ShiftInput, ShiftPatch};
