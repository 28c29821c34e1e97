//! Proportional tip allocation.
//!
//! This module splits a tip pool across a roster in proportion to hours
//! worked. Every share is rounded **down**, so the sum of payouts can never
//! exceed the pool; whatever rounding leaves behind is reported as the
//! leftover.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, RosterEntry};

/// One employee's proportional share of a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipShare {
    /// The employee this share belongs to.
    pub employee_id: String,
    /// Hours worked.
    pub hours: Decimal,
    /// `hours / total_hours`.
    pub ratio: Decimal,
    /// `pool * hours / total_hours` before rounding.
    pub exact_share: Decimal,
    /// The exact share floored to the allocation scale.
    pub final_tip_amount: Decimal,
    /// `final_tip_amount / hours`, informational.
    pub hourly_rate: Decimal,
}

/// The result of allocating a pool, including the audit step.
#[derive(Debug, Clone)]
pub struct AllocationResult {
    /// Shares in roster order.
    pub shares: Vec<TipShare>,
    /// Sum of hours on the roster.
    pub total_hours: Decimal,
    /// Sum of every floored share.
    pub distributed: Decimal,
    /// `pool - distributed`; never negative.
    pub leftover: Decimal,
    /// The audit step recording this allocation.
    pub audit_step: AuditStep,
}

/// Checks that a roster can be proportionally divided.
///
/// A roster is valid when it is non-empty, every entry names an employee
/// exactly once, and every entry has strictly positive hours.
pub fn validate_roster(roster: &[RosterEntry]) -> EngineResult<()> {
    if roster.is_empty() {
        return Err(EngineError::invalid_roster("roster is empty"));
    }

    let mut seen = HashSet::with_capacity(roster.len());
    for entry in roster {
        if entry.employee_id.trim().is_empty() {
            return Err(EngineError::invalid_roster("roster entry has no employee id"));
        }
        if !seen.insert(entry.employee_id.as_str()) {
            return Err(EngineError::invalid_roster(format!(
                "employee '{}' appears more than once",
                entry.employee_id
            )));
        }
        if entry.hours <= Decimal::ZERO {
            return Err(EngineError::invalid_roster(format!(
                "employee '{}' has non-positive hours ({})",
                entry.employee_id, entry.hours
            )));
        }
    }

    Ok(())
}

/// Allocates `pool` across `roster`, paying whole currency units.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::allocate;
/// use tip_engine::models::RosterEntry;
/// use rust_decimal::Decimal;
///
/// let roster = vec![
///     RosterEntry::new("a", Decimal::ONE),
///     RosterEntry::new("b", Decimal::ONE),
///     RosterEntry::new("c", Decimal::ONE),
/// ];
/// let result = allocate(Decimal::new(100, 0), &roster).unwrap();
///
/// assert!(result.shares.iter().all(|s| s.final_tip_amount == Decimal::new(33, 0)));
/// assert_eq!(result.leftover, Decimal::ONE);
/// ```
pub fn allocate(pool: Decimal, roster: &[RosterEntry]) -> EngineResult<AllocationResult> {
    allocate_with_scale(pool, roster, 0, 1)
}

/// Allocates `pool` across `roster`, flooring each share to `scale` decimal
/// places.
///
/// # Arguments
///
/// * `pool` - The amount to divide; must not be negative
/// * `roster` - Who worked and for how long
/// * `scale` - Decimal places payouts are floored to (0 = whole units)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns an `AllocationResult`, or:
/// - `InvalidPool` when the pool is negative
/// - `InvalidRoster` when the roster is empty, repeats an employee, or has
///   an entry with non-positive hours
pub fn allocate_with_scale(
    pool: Decimal,
    roster: &[RosterEntry],
    scale: u32,
    step_number: u32,
) -> EngineResult<AllocationResult> {
    if pool.is_sign_negative() && !pool.is_zero() {
        return Err(EngineError::InvalidPool { amount: pool });
    }
    validate_roster(roster)?;

    let total_hours = roster
        .iter()
        .try_fold(Decimal::ZERO, |sum, entry| sum.checked_add(entry.hours))
        .ok_or_else(|| EngineError::invalid_input("hours", "total hours are out of range"))?;
    if total_hours <= Decimal::ZERO {
        return Err(EngineError::invalid_roster("total hours must be greater than zero"));
    }

    let shares: Vec<TipShare> = roster
        .iter()
        .map(|entry| -> EngineResult<TipShare> {
            // Multiply before dividing so whole-number shares stay exact.
            let exact_share = pool
                .checked_mul(entry.hours)
                .and_then(|product| product.checked_div(total_hours))
                .ok_or_else(|| {
                    EngineError::invalid_input(
                        "pool",
                        format!("{} is too large to split over {}h", pool, total_hours),
                    )
                })?;
            let final_tip_amount =
                exact_share.round_dp_with_strategy(scale, RoundingStrategy::ToNegativeInfinity);
            let hourly_rate = final_tip_amount.checked_div(entry.hours).ok_or_else(|| {
                EngineError::invalid_input(
                    "hours",
                    format!("employee '{}' hourly rate is out of range", entry.employee_id),
                )
            })?;
            Ok(TipShare {
                employee_id: entry.employee_id.clone(),
                hours: entry.hours,
                ratio: entry.hours / total_hours,
                exact_share,
                final_tip_amount,
                hourly_rate,
            })
        })
        .collect::<EngineResult<_>>()?;

    let distributed: Decimal = shares.iter().map(|s| s.final_tip_amount).sum();
    let leftover = pool - distributed;

    let audit_step = AuditStep {
        step_number,
        rule_id: "proportional_allocation".to_string(),
        rule_name: "Proportional Allocation".to_string(),
        input: serde_json::json!({
            "pool": pool.normalize().to_string(),
            "total_hours": total_hours.normalize().to_string(),
            "scale": scale,
            "roster": roster
                .iter()
                .map(|e| serde_json::json!({
                    "employee_id": e.employee_id,
                    "hours": e.hours.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "shares": shares
                .iter()
                .map(|s| serde_json::json!({
                    "employee_id": s.employee_id,
                    "exact_share": s.exact_share.normalize().to_string(),
                    "final_tip_amount": s.final_tip_amount.normalize().to_string()
                }))
                .collect::<Vec<_>>(),
            "distributed": distributed.normalize().to_string(),
            "leftover": leftover.normalize().to_string()
        }),
        reasoning: format!(
            "Split ${} over {}h across {} employees, rounding every share down: distributed ${}, leftover ${}",
            pool.normalize(),
            total_hours.normalize(),
            shares.len(),
            distributed.normalize(),
            leftover.normalize()
        ),
    };

    Ok(AllocationResult {
        shares,
        total_hours,
        distributed,
        leftover,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn roster(entries: &[(&str, &str)]) -> Vec<RosterEntry> {
        entries
            .iter()
            .map(|(id, hours)| RosterEntry::new(*id, dec(hours)))
            .collect()
    }

    /// Scenario A: shares that divide evenly leave nothing behind
    #[test]
    fn test_even_split_six_and_four_hours() {
        let result = allocate(dec("1000"), &roster(&[("A", "6"), ("B", "4")])).unwrap();

        assert_eq!(result.total_hours, dec("10"));
        assert_eq!(result.shares[0].exact_share, dec("600"));
        assert_eq!(result.shares[0].final_tip_amount, dec("600"));
        assert_eq!(result.shares[1].final_tip_amount, dec("400"));
        assert_eq!(result.shares[0].ratio, dec("0.6"));
        assert_eq!(result.leftover, Decimal::ZERO);
    }

    /// Scenario B: three equal shares of 100
    #[test]
    fn test_three_way_split_leaves_one() {
        let result = allocate(
            dec("100"),
            &roster(&[("A", "1"), ("B", "1"), ("C", "1")]),
        )
        .unwrap();

        for share in &result.shares {
            assert_eq!(share.final_tip_amount, dec("33"));
            assert!(share.exact_share > dec("33.333") && share.exact_share < dec("33.334"));
        }
        assert_eq!(result.distributed, dec("99"));
        assert_eq!(result.leftover, dec("1"));
    }

    #[test]
    fn test_single_employee_gets_floor_of_pool() {
        let result = allocate(dec("250.75"), &roster(&[("A", "7.5")])).unwrap();

        assert_eq!(result.shares[0].final_tip_amount, dec("250"));
        assert_eq!(result.leftover, dec("0.75"));
        assert_eq!(result.shares[0].ratio, Decimal::ONE);
    }

    #[test]
    fn test_fractional_hours() {
        let result = allocate(dec("300"), &roster(&[("A", "7.5"), ("B", "15")])).unwrap();

        assert_eq!(result.shares[0].final_tip_amount, dec("100"));
        assert_eq!(result.shares[1].final_tip_amount, dec("200"));
        assert_eq!(result.leftover, Decimal::ZERO);
    }

    #[test]
    fn test_hourly_rate_is_final_over_hours() {
        let result = allocate(dec("100"), &roster(&[("A", "4"), ("B", "6")])).unwrap();
        assert_eq!(result.shares[0].hourly_rate, dec("10"));
        assert_eq!(result.shares[1].hourly_rate, dec("10"));
    }

    #[test]
    fn test_zero_pool_pays_nothing() {
        let result = allocate(Decimal::ZERO, &roster(&[("A", "4"), ("B", "6")])).unwrap();
        assert!(result.shares.iter().all(|s| s.final_tip_amount.is_zero()));
        assert_eq!(result.leftover, Decimal::ZERO);
    }

    #[test]
    fn test_scale_two_floors_to_cents() {
        let result = allocate_with_scale(
            dec("100"),
            &roster(&[("A", "1"), ("B", "1"), ("C", "1")]),
            2,
            1,
        )
        .unwrap();

        assert!(result.shares.iter().all(|s| s.final_tip_amount == dec("33.33")));
        assert_eq!(result.leftover, dec("0.01"));
    }

    #[test]
    fn test_negative_pool_rejected() {
        let result = allocate(dec("-1"), &roster(&[("A", "4")]));
        match result.unwrap_err() {
            EngineError::InvalidPool { amount } => assert_eq!(amount, dec("-1")),
            other => panic!("Expected InvalidPool, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_roster_rejected() {
        let result = allocate(dec("100"), &[]);
        assert!(matches!(result.unwrap_err(), EngineError::InvalidRoster { .. }));
    }

    #[test]
    fn test_zero_hours_rejected_instead_of_dividing_by_zero() {
        let result = allocate(dec("100"), &roster(&[("A", "0")]));
        assert!(matches!(result.unwrap_err(), EngineError::InvalidRoster { .. }));

        let result = allocate(dec("100"), &roster(&[("A", "5"), ("B", "0")]));
        assert!(matches!(result.unwrap_err(), EngineError::InvalidRoster { .. }));
    }

    #[test]
    fn test_negative_hours_rejected() {
        let result = allocate(dec("100"), &roster(&[("A", "5"), ("B", "-2")]));
        assert!(matches!(result.unwrap_err(), EngineError::InvalidRoster { .. }));
    }

    #[test]
    fn test_duplicate_employee_rejected() {
        let result = allocate(dec("100"), &roster(&[("A", "5"), ("A", "2")]));
        let error = result.unwrap_err();
        assert!(error.to_string().contains("more than once"));
    }

    #[test]
    fn test_audit_step_records_leftover() {
        let result = allocate_with_scale(
            dec("100"),
            &roster(&[("A", "1"), ("B", "1"), ("C", "1")]),
            0,
            7,
        )
        .unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "proportional_allocation");
        assert_eq!(result.audit_step.output["leftover"], "1");
        assert_eq!(result.audit_step.output["distributed"], "99");
    }

    #[test]
    fn test_pool_too_large_to_split_is_an_error() {
        let pool = Decimal::from_str("10000000000000000000000000000").unwrap();
        let result = allocate(pool, &roster(&[("A", "8"), ("B", "2")]));

        match result.unwrap_err() {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "pool"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_pool_for_single_hour() {
        let result = allocate(Decimal::MAX, &roster(&[("A", "1")])).unwrap();
        assert_eq!(result.shares[0].final_tip_amount, Decimal::MAX);
        assert_eq!(result.leftover, Decimal::ZERO);
    }

    #[test]
    fn test_total_hours_out_of_range_is_an_error() {
        let entries = vec![
            RosterEntry::new("A", Decimal::MAX),
            RosterEntry::new("B", Decimal::MAX),
        ];
        let result = allocate(dec("100"), &entries);
        assert!(matches!(result.unwrap_err(), EngineError::InvalidInput { .. }));
    }

    fn hours_strategy() -> impl Strategy<Value = Decimal> {
        // Quarter hours between 0.25h and 16h.
        (1i64..=64).prop_map(|quarters| Decimal::new(quarters * 25, 2))
    }

    fn pool_strategy() -> impl Strategy<Value = Decimal> {
        // Up to 100,000.00 in cents.
        (0i64..=10_000_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn roster_strategy() -> impl Strategy<Value = Vec<RosterEntry>> {
        prop::collection::vec(hours_strategy(), 1..12).prop_map(|hours| {
            hours
                .into_iter()
                .enumerate()
                .map(|(i, h)| RosterEntry::new(format!("emp_{}", i), h))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_conservation(pool in pool_strategy(), roster in roster_strategy()) {
            let result = allocate(pool, &roster).unwrap();
            let paid: Decimal = result.shares.iter().map(|s| s.final_tip_amount).sum();
            prop_assert_eq!(paid + result.leftover, pool);
        }

        #[test]
        fn prop_non_negative_and_bounded_leftover(pool in pool_strategy(), roster in roster_strategy()) {
            let result = allocate(pool, &roster).unwrap();
            prop_assert!(result.shares.iter().all(|s| s.final_tip_amount >= Decimal::ZERO));
            prop_assert!(result.leftover >= Decimal::ZERO);
            // Each share loses strictly less than one unit to rounding, and a
            // fractional pool may leave up to one more unit.
            prop_assert!(result.leftover < Decimal::from(roster.len() + 1));
        }

        #[test]
        fn prop_more_hours_never_pays_less(
            pool in pool_strategy(),
            roster in roster_strategy(),
            extra in hours_strategy(),
        ) {
            let before = allocate(pool, &roster).unwrap();
            let mut longer = roster.clone();
            longer[0].hours += extra;
            let after = allocate(pool, &longer).unwrap();
            prop_assert!(after.shares[0].final_tip_amount >= before.shares[0].final_tip_amount);
        }

        #[test]
        fn prop_deterministic(pool in pool_strategy(), roster in roster_strategy()) {
            let first = allocate(pool, &roster).unwrap();
            let second = allocate(pool, &roster).unwrap();
            prop_assert_eq!(first.shares, second.shares);
            prop_assert_eq!(first.leftover, second.leftover);
            prop_assert_eq!(first.audit_step, second.audit_step);
        }
    }
}
