//! End-to-end calculation of one shift.
//!
//! [`calculate_shift`] takes a single immutable [`ShiftInput`], resolves the
//! roster through the employee directory, reconciles the register, allocates
//! the distributable pool and returns a single immutable
//! [`ShiftCalculation`]. Nothing is kept between calls.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::HouseSettings;
use crate::directory::EmployeeDirectory;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, AuditWarning, Employee, ShiftAllocation, ShiftCalculation, ShiftInput,
};

use super::allocation::{allocate_with_scale, validate_roster};
use super::input::ensure_non_negative;
use super::reconciliation::{DeductionLine, reconcile};

/// Which employees may appear on a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterPolicy {
    /// Only active employees; used for new shifts.
    ActiveOnly,
    /// Inactive employees too; used when recalculating a saved shift whose
    /// staff has since been deactivated.
    IncludeInactive,
}

/// Calculates the payout for one shift.
///
/// # Returns
///
/// Returns a `ShiftCalculation`, or an error if:
/// - A tip amount is negative (`InvalidInput`)
/// - The roster is empty, repeats an employee, or has non-positive hours
///   (`InvalidRoster`)
/// - A roster employee is unknown (`EmployeeNotFound`)
/// - A roster employee is inactive under `RosterPolicy::ActiveOnly`
///   (`InvalidRoster`)
pub fn calculate_shift(
    input: &ShiftInput,
    directory: &EmployeeDirectory,
    house: &HouseSettings,
    policy: RosterPolicy,
) -> EngineResult<ShiftCalculation> {
    let start_time = Instant::now();

    ensure_non_negative("cash_tips", input.cash_tips)?;
    ensure_non_negative("credit_tips", input.credit_tips)?;
    validate_roster(&input.roster)?;

    let employees = resolve_roster(input, directory, policy)?;

    let deduction_lines: Vec<DeductionLine> = input
        .roster
        .iter()
        .zip(&employees)
        .map(|(entry, employee)| DeductionLine {
            employee_id: entry.employee_id.clone(),
            hours: entry.hours,
            hourly_deduction: employee.effective_deduction_rate(house.default_hourly_deduction),
        })
        .collect();

    let reconciliation = reconcile(input.cash_tips, input.credit_tips, &deduction_lines, 1)?;
    let allocation = allocate_with_scale(
        reconciliation.total_tips_for_distribution,
        &input.roster,
        house.rounding_scale,
        2,
    )?;

    let allocations: Vec<ShiftAllocation> = allocation
        .shares
        .iter()
        .zip(&deduction_lines)
        .zip(&employees)
        .map(|((share, deduction), employee)| -> EngineResult<ShiftAllocation> {
            Ok(ShiftAllocation {
                employee_id: share.employee_id.clone(),
                name: employee.name.clone(),
                hours: share.hours,
                ratio: share.ratio,
                tip_amount: share.final_tip_amount,
                hourly_deduction: deduction.hourly_deduction,
                daily_deduction: deduction.daily_deduction()?,
                final_tip_amount: share.final_tip_amount,
                hourly_rate: share.hourly_rate,
            })
        })
        .collect::<EngineResult<_>>()?;

    let mut warnings = Vec::new();
    if reconciliation.cash_from_register > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "REGISTER_WITHDRAWAL".to_string(),
            message: format!(
                "Take {} {} from the register to cover hourly deductions",
                reconciliation.cash_from_register.normalize(),
                house.currency
            ),
            severity: "medium".to_string(),
        });
    }
    if allocation.leftover > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "UNDISTRIBUTED_LEFTOVER".to_string(),
            message: format!(
                "{} {} left undistributed after rounding; it is not carried to the next shift automatically",
                allocation.leftover.normalize(),
                house.currency
            ),
            severity: "low".to_string(),
        });
    }

    debug!(
        date = %input.date,
        employees = allocations.len(),
        pool = %reconciliation.total_tips_for_distribution,
        cash_from_register = %reconciliation.cash_from_register,
        leftover = %allocation.leftover,
        "Shift calculated"
    );

    Ok(ShiftCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        date: input.date,
        cash_tips: input.cash_tips,
        credit_tips: input.credit_tips,
        total_hours: allocation.total_hours,
        total_deductions: reconciliation.total_deductions,
        cash_from_register: reconciliation.cash_from_register,
        total_tips_for_distribution: reconciliation.total_tips_for_distribution,
        employees: allocations,
        distributed: allocation.distributed,
        leftover: allocation.leftover,
        audit_trace: AuditTrace {
            steps: vec![reconciliation.audit_step, allocation.audit_step],
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

fn resolve_roster<'a>(
    input: &ShiftInput,
    directory: &'a EmployeeDirectory,
    policy: RosterPolicy,
) -> EngineResult<Vec<&'a Employee>> {
    input
        .roster
        .iter()
        .map(|entry| {
            let employee = directory.get(&entry.employee_id)?;
            if policy == RosterPolicy::ActiveOnly && !employee.is_active {
                return Err(EngineError::invalid_roster(format!(
                    "employee '{}' is inactive",
                    employee.id
                )));
            }
            Ok(employee)
        })
        .collect()
}
