//! Report folds over persisted shifts.
//!
//! Reports trust each shift's stored allocation as-is: they only sum, they
//! never re-run rounding or allocation.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    EmployeeMonthlySummary, EmployeePeriodReport, EmployeeShiftLine, MonthlyReport,
    MonthlyTotals, Shift,
};

/// Returns the first and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || {
        EngineError::invalid_input("month", format!("{}-{:02} is not a calendar month", year, month))
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

/// Per-hour average rounded to cents; zero when there are no hours.
pub fn average_per_hour(amount: Decimal, hours: Decimal) -> Decimal {
    if hours.is_zero() {
        Decimal::ZERO
    } else {
        (amount / hours).round_dp(2)
    }
}

/// Folds every shift of a month into per-employee rows and a grand total.
///
/// Shifts outside the month are ignored.
pub fn summarize_month(year: i32, month: u32, shifts: &[Shift]) -> MonthlyReport {
    let mut rows: HashMap<String, EmployeeMonthlySummary> = HashMap::new();
    let mut latest_name_date: HashMap<String, NaiveDate> = HashMap::new();
    let mut totals = MonthlyTotals::default();
    let mut leftover_total = Decimal::ZERO;

    for shift in shifts
        .iter()
        .filter(|s| s.date.year() == year && s.date.month() == month)
    {
        totals.shifts_count += 1;
        leftover_total += shift.leftover;

        for allocation in &shift.employees {
            let row = rows
                .entry(allocation.employee_id.clone())
                .or_insert_with(|| EmployeeMonthlySummary {
                    employee_id: allocation.employee_id.clone(),
                    name: allocation.name.clone(),
                    shifts_count: 0,
                    total_hours: Decimal::ZERO,
                    total_tips: Decimal::ZERO,
                    total_deductions: Decimal::ZERO,
                    final_tips: Decimal::ZERO,
                    average_tip_per_hour: Decimal::ZERO,
                });

            // The most recent snapshot names the row.
            let seen = latest_name_date
                .entry(allocation.employee_id.clone())
                .or_insert(shift.date);
            if shift.date >= *seen {
                *seen = shift.date;
                row.name = allocation.name.clone();
            }

            row.shifts_count += 1;
            row.total_hours += allocation.hours;
            row.total_tips += allocation.tip_amount;
            row.total_deductions += allocation.daily_deduction;
            row.final_tips += allocation.final_tip_amount;

            totals.total_hours += allocation.hours;
            totals.total_tips += allocation.tip_amount;
            totals.total_deductions += allocation.daily_deduction;
            totals.final_tips += allocation.final_tip_amount;
        }
    }

    let mut employee_summary: Vec<EmployeeMonthlySummary> = rows
        .into_values()
        .map(|mut row| {
            row.average_tip_per_hour = average_per_hour(row.final_tips, row.total_hours);
            row
        })
        .collect();
    employee_summary.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });

    MonthlyReport {
        year,
        month,
        employee_summary,
        totals,
        leftover_total,
    }
}

/// Collects one employee's lines and totals from `shifts`.
///
/// Shifts the employee did not work are skipped.
pub fn summarize_employee(
    employee_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    shifts: &[Shift],
) -> EmployeePeriodReport {
    let mut lines: Vec<EmployeeShiftLine> = shifts
        .iter()
        .filter_map(|shift| {
            shift
                .allocation_for(employee_id)
                .map(|allocation| EmployeeShiftLine {
                    date: shift.date,
                    hours: allocation.hours,
                    tip_amount: allocation.tip_amount,
                    final_tip_amount: allocation.final_tip_amount,
                    hourly_rate: allocation.hourly_rate,
                })
        })
        .collect();
    lines.sort_by_key(|line| line.date);

    let total_hours: Decimal = lines.iter().map(|l| l.hours).sum();
    let total_tips: Decimal = lines.iter().map(|l| l.tip_amount).sum();
    let final_tips: Decimal = lines.iter().map(|l| l.final_tip_amount).sum();

    EmployeePeriodReport {
        employee_id: employee_id.to_string(),
        start,
        end,
        shifts: lines,
        total_hours,
        total_tips,
        final_tips,
        average_tip_per_hour: average_per_hour(final_tips, total_hours),
    }
}
