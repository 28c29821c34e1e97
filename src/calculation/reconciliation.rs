//! Cash-register reconciliation.
//!
//! Every employee is guaranteed an hourly deduction that is funded from card
//! tips first. When card tips cannot cover the total, the shortfall is taken
//! from the register in cash and added to the distributable pool. The
//! per-employee deduction is then only recorded for audit; it is never
//! subtracted from the allocation a second time.
//!
//! Amounts too large for decimal arithmetic are rejected as invalid input.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::input::ensure_non_negative;

/// Hours and deduction rate for one roster member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionLine {
    /// The employee the deduction belongs to.
    pub employee_id: String,
    /// Hours worked.
    pub hours: Decimal,
    /// Guaranteed amount per hour.
    pub hourly_deduction: Decimal,
}

impl DeductionLine {
    /// `hours * hourly_deduction`.
    pub fn daily_deduction(&self) -> EngineResult<Decimal> {
        self.hours.checked_mul(self.hourly_deduction).ok_or_else(|| {
            EngineError::invalid_input(
                "hourly_deduction",
                format!("employee '{}' deduction is out of range", self.employee_id),
            )
        })
    }
}

/// The result of reconciling the register, including the audit step.
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    /// Sum of every daily deduction.
    pub total_deductions: Decimal,
    /// Cash pulled from the register to cover the shortfall.
    pub cash_from_register: Decimal,
    /// `cash_tips + cash_from_register`; the pool handed to allocation.
    pub total_tips_for_distribution: Decimal,
    /// The audit step recording this reconciliation.
    pub audit_step: AuditStep,
}

/// Derives the register withdrawal and the distributable pool.
///
/// The register covers only the part of the deductions card tips cannot:
/// `max(0, total_deductions - credit_tips)`. Cash tips never offset the
/// deductions, so cash 500, card 300 and deductions 350 take 50 from the
/// register and distribute 550.
///
/// # Arguments
///
/// * `cash_tips` - Cash gratuities; must not be negative
/// * `credit_tips` - Card gratuities; must not be negative
/// * `roster` - Hours and deduction rate per employee
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::{reconcile, DeductionLine};
/// use rust_decimal::Decimal;
///
/// let roster = vec![DeductionLine {
///     employee_id: "a".to_string(),
///     hours: Decimal::new(10, 0),
///     hourly_deduction: Decimal::new(25, 0),
/// }];
/// let result = reconcile(Decimal::new(200, 0), Decimal::new(100, 0), &roster, 1).unwrap();
///
/// assert_eq!(result.total_deductions, Decimal::new(250, 0));
/// assert_eq!(result.cash_from_register, Decimal::new(150, 0));
/// assert_eq!(result.total_tips_for_distribution, Decimal::new(350, 0));
/// ```
pub fn reconcile(
    cash_tips: Decimal,
    credit_tips: Decimal,
    roster: &[DeductionLine],
    step_number: u32,
) -> EngineResult<ReconciliationResult> {
    ensure_non_negative("cash_tips", cash_tips)?;
    ensure_non_negative("credit_tips", credit_tips)?;
    for line in roster {
        if line.hours.is_sign_negative() && !line.hours.is_zero() {
            return Err(EngineError::invalid_input(
                "hours",
                format!("employee '{}' has negative hours", line.employee_id),
            ));
        }
        ensure_non_negative("hourly_deduction", line.hourly_deduction)?;
    }

    let total_deductions =
        roster
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| -> EngineResult<Decimal> {
                sum.checked_add(line.daily_deduction()?).ok_or_else(|| {
                    EngineError::invalid_input("hourly_deduction", "total deductions are out of range")
                })
            })?;
    let cash_from_register = (total_deductions - credit_tips).max(Decimal::ZERO);
    let total_tips_for_distribution =
        cash_tips.checked_add(cash_from_register).ok_or_else(|| {
            EngineError::invalid_input(
                "cash_tips",
                format!(
                    "{} plus a register withdrawal of {} is out of range",
                    cash_tips, cash_from_register
                ),
            )
        })?;

    let reasoning = if cash_from_register.is_zero() {
        format!(
            "Card tips ${} cover deductions of ${}; nothing taken from the register, pool is cash tips ${}",
            credit_tips.normalize(),
            total_deductions.normalize(),
            total_tips_for_distribution.normalize()
        )
    } else {
        format!(
            "Deductions ${} exceed card tips ${}: take ${} from the register, pool ${} + ${} = ${}",
            total_deductions.normalize(),
            credit_tips.normalize(),
            cash_from_register.normalize(),
            cash_tips.normalize(),
            cash_from_register.normalize(),
            total_tips_for_distribution.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "register_reconciliation".to_string(),
        rule_name: "Register Reconciliation".to_string(),
        input: serde_json::json!({
            "cash_tips": cash_tips.normalize().to_string(),
            "credit_tips": credit_tips.normalize().to_string(),
            "deductions": roster
                .iter()
                .map(|line| serde_json::json!({
                    "employee_id": line.employee_id,
                    "hours": line.hours.normalize().to_string(),
                    "hourly_deduction": line.hourly_deduction.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string(),
            "cash_from_register": cash_from_register.normalize().to_string(),
            "total_tips_for_distribution": total_tips_for_distribution.normalize().to_string()
        }),
        reasoning,
    };

    Ok(ReconciliationResult {
        total_deductions,
        cash_from_register,
        total_tips_for_distribution,
        audit_step,
    })
}
