//! Calculation result models for the Tip Distribution Engine.
//!
//! This module contains the [`ShiftCalculation`] type and its audit
//! structures. A calculation is the complete, immutable output of one run of
//! the engine; it becomes a ledger record through [`ShiftCalculation::into_shift`]
//! or [`ShiftCalculation::into_patch`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Shift, ShiftAllocation, ShiftPatch};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag conditions that need a human's attention, such as cash
/// that has to be pulled from the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use tip_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of one shift calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCalculation {
    /// Unique id of this calculation run.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The calendar day being calculated.
    pub date: NaiveDate,
    /// Cash gratuities collected.
    pub cash_tips: Decimal,
    /// Card/credit gratuities collected.
    pub credit_tips: Decimal,
    /// Sum of hours on the roster.
    pub total_hours: Decimal,
    /// Sum of every employee's daily deduction.
    pub total_deductions: Decimal,
    /// Cash withdrawn from the register to cover the deduction shortfall.
    pub cash_from_register: Decimal,
    /// The pool that was divided.
    pub total_tips_for_distribution: Decimal,
    /// Per-employee payouts in roster order.
    pub employees: Vec<ShiftAllocation>,
    /// Sum of the payable amounts.
    pub distributed: Decimal,
    /// Rounding remainder; reported, never carried automatically.
    pub leftover: Decimal,
    /// Every decision taken while calculating.
    pub audit_trace: AuditTrace,
}

impl ShiftCalculation {
    /// Turns the calculation into a new ledger record.
    pub fn into_shift(self, created_by: impl Into<String>) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            date: self.date,
            cash_tips: self.cash_tips,
            credit_tips: self.credit_tips,
            total_deductions: self.total_deductions,
            cash_from_register: self.cash_from_register,
            total_tips_for_distribution: self.total_tips_for_distribution,
            employees: self.employees,
            leftover: self.leftover,
            created_by: created_by.into(),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        }
    }

    /// Turns the calculation into a replacement for an existing record.
    pub fn into_patch(self, updated_by: impl Into<String>) -> ShiftPatch {
        ShiftPatch {
            date: self.date,
            cash_tips: self.cash_tips,
            credit_tips: self.credit_tips,
            total_deductions: self.total_deductions,
            cash_from_register: self.cash_from_register,
            total_tips_for_distribution: self.total_tips_for_distribution,
            employees: self.employees,
            leftover: self.leftover,
            updated_by: updated_by.into(),
        }
    }
}
