//! Shift model and related types.
//!
//! A [`Shift`] is one calendar day's finalized tip computation. Each
//! participating employee is recorded as an embedded [`ShiftAllocation`]
//! carrying a snapshot of their name, so later renames or deactivations
//! never corrupt history.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One employee's hours on the roster of a shift being calculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// The employee who worked.
    pub employee_id: String,
    /// Hours worked, may be fractional (e.g. 7.5).
    pub hours: Decimal,
}

impl RosterEntry {
    /// Creates a roster entry.
    pub fn new(employee_id: impl Into<String>, hours: Decimal) -> Self {
        Self {
            employee_id: employee_id.into(),
            hours,
        }
    }
}

/// The immutable input of a single shift calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftInput {
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// Cash gratuities collected.
    pub cash_tips: Decimal,
    /// Card/credit gratuities collected.
    pub credit_tips: Decimal,
    /// Who worked and for how long.
    pub roster: Vec<RosterEntry>,
}

/// One employee's payout within a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAllocation {
    /// The employee this allocation belongs to.
    pub employee_id: String,
    /// Name snapshot taken when the shift was calculated.
    pub name: String,
    /// Hours worked.
    pub hours: Decimal,
    /// `hours / total_hours` for the shift.
    pub ratio: Decimal,
    /// Floored share of the pool before deduction accounting.
    pub tip_amount: Decimal,
    /// Hourly deduction rate applied to this employee.
    pub hourly_deduction: Decimal,
    /// `hours * hourly_deduction`, kept for audit.
    pub daily_deduction: Decimal,
    /// The amount actually payable.
    pub final_tip_amount: Decimal,
    /// `final_tip_amount / hours`, informational.
    pub hourly_rate: Decimal,
}

/// A finalized shift as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Opaque record id.
    pub id: Uuid,
    /// The calendar day; at most one shift exists per date.
    pub date: NaiveDate,
    /// Cash gratuities collected.
    pub cash_tips: Decimal,
    /// Card/credit gratuities collected.
    pub credit_tips: Decimal,
    /// Sum of every allocation's daily deduction.
    pub total_deductions: Decimal,
    /// Cash withdrawn from the register to cover the deduction shortfall.
    pub cash_from_register: Decimal,
    /// The pool that was divided.
    pub total_tips_for_distribution: Decimal,
    /// Per-employee payouts.
    pub employees: Vec<ShiftAllocation>,
    /// Rounding remainder left undistributed.
    pub leftover: Decimal,
    /// Who saved the shift.
    pub created_by: String,
    /// When the shift was saved.
    pub created_at: DateTime<Utc>,
    /// Who last edited the shift.
    #[serde(default)]
    pub updated_by: Option<String>,
    /// When the shift was last edited.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shift {
    /// Sum of every allocation's payable amount.
    pub fn distributed(&self) -> Decimal {
        self.employees.iter().map(|a| a.final_tip_amount).sum()
    }

    /// Returns true when the payouts plus the leftover equal the pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use tip_engine::models::Shift;
    /// use chrono::{NaiveDate, Utc};
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let shift = Shift {
    ///     id: Uuid::new_v4(),
    ///     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
    ///     cash_tips: Decimal::new(10, 0),
    ///     credit_tips: Decimal::ZERO,
    ///     total_deductions: Decimal::ZERO,
    ///     cash_from_register: Decimal::ZERO,
    ///     total_tips_for_distribution: Decimal::new(10, 0),
    ///     employees: vec![],
    ///     leftover: Decimal::new(10, 0),
    ///     created_by: "admin".to_string(),
    ///     created_at: Utc::now(),
    ///     updated_by: None,
    ///     updated_at: None,
    /// };
    /// assert!(shift.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.distributed() + self.leftover == self.total_tips_for_distribution
    }

    /// Returns the allocation for `employee_id`, if they worked this shift.
    pub fn allocation_for(&self, employee_id: &str) -> Option<&ShiftAllocation> {
        self.employees.iter().find(|a| a.employee_id == employee_id)
    }

    /// Applies a recomputed patch, keeping the record's identity and creation
    /// audit fields.
    pub fn apply_patch(&mut self, patch: ShiftPatch, updated_at: DateTime<Utc>) {
        self.date = patch.date;
        self.cash_tips = patch.cash_tips;
        self.credit_tips = patch.credit_tips;
        self.total_deductions = patch.total_deductions;
        self.cash_from_register = patch.cash_from_register;
        self.total_tips_for_distribution = patch.total_tips_for_distribution;
        self.employees = patch.employees;
        self.leftover = patch.leftover;
        self.updated_by = Some(patch.updated_by);
        self.updated_at = Some(updated_at);
    }
}

/// A full replacement of a shift's computed content.
///
/// The ledger stores a patch as supplied; producing it (by re-running the
/// calculation) is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPatch {
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// Cash gratuities collected.
    pub cash_tips: Decimal,
    /// Card/credit gratuities collected.
    pub credit_tips: Decimal,
    /// Sum of every allocation's daily deduction.
    pub total_deductions: Decimal,
    /// Cash withdrawn from the register.
    pub cash_from_register: Decimal,
    /// The pool that was divided.
    pub total_tips_for_distribution: Decimal,
    /// Per-employee payouts.
    pub employees: Vec<ShiftAllocation>,
    /// Rounding remainder.
    pub leftover: Decimal,
    /// Who made the edit.
    pub updated_by: String,
}

impl ShiftPatch {
    /// Returns true when the payouts plus the leftover equal the pool.
    pub fn is_balanced(&self) -> bool {
        let distributed: Decimal = self.employees.iter().map(|a| a.final_tip_amount).sum();
        distributed + self.leftover == self.total_tips_for_distribution
    }
}
