//! Report models built from persisted shifts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's totals over a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonthlySummary {
    /// The employee.
    pub employee_id: String,
    /// Most recent name snapshot seen in the month.
    pub name: String,
    /// Number of shifts worked.
    pub shifts_count: u32,
    /// Hours worked.
    pub total_hours: Decimal,
    /// Sum of floored shares before deduction accounting.
    pub total_tips: Decimal,
    /// Sum of daily deductions.
    pub total_deductions: Decimal,
    /// Sum of payable amounts.
    pub final_tips: Decimal,
    /// `final_tips / total_hours`, zero when no hours.
    pub average_tip_per_hour: Decimal,
}

/// The grand-total row of a monthly report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Number of shifts in the month.
    pub shifts_count: u32,
    /// Hours worked by everyone.
    pub total_hours: Decimal,
    /// Sum of floored shares before deduction accounting.
    pub total_tips: Decimal,
    /// Sum of daily deductions.
    pub total_deductions: Decimal,
    /// Sum of payable amounts.
    pub final_tips: Decimal,
}

/// Aggregate of every shift in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Per-employee rows, ordered by name then id.
    pub employee_summary: Vec<EmployeeMonthlySummary>,
    /// Grand-total row.
    pub totals: MonthlyTotals,
    /// Sum of every shift's undistributed remainder.
    pub leftover_total: Decimal,
}

/// One shift as seen by a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeShiftLine {
    /// The shift day.
    pub date: NaiveDate,
    /// Hours worked.
    pub hours: Decimal,
    /// Floored share before deduction accounting.
    pub tip_amount: Decimal,
    /// Payable amount.
    pub final_tip_amount: Decimal,
    /// `final_tip_amount / hours`.
    pub hourly_rate: Decimal,
}

/// One employee's shifts over a date range with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePeriodReport {
    /// The employee.
    pub employee_id: String,
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
    /// One line per shift worked, ascending by date.
    pub shifts: Vec<EmployeeShiftLine>,
    /// Hours worked.
    pub total_hours: Decimal,
    /// Sum of floored shares.
    pub total_tips: Decimal,
    /// Sum of payable amounts.
    pub final_tips: Decimal,
    /// `final_tips / total_hours`, zero when no hours.
    pub average_tip_per_hour: Decimal,
}
