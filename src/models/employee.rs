//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! tipped staff in the tip distribution system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The house-wide hourly deduction applied when an employee has no rate of
/// their own.
pub const DEFAULT_HOURLY_DEDUCTION: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// The floor role an employee works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Floor service.
    Waiter,
    /// Bar service.
    Bartender,
}

/// Represents an employee who can take part in a tip pool.
///
/// Employees are never hard-deleted: deactivation hides them from new
/// rosters while historical shifts keep referencing their id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque identifier, stable across shifts.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The role the employee works in.
    pub role: Role,
    /// Guaranteed amount per hour, funded from card tips first.
    ///
    /// `None` means the house default applies.
    #[serde(default)]
    pub hourly_deduction_rate: Option<Decimal>,
    /// Whether the employee can be added to new shifts.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns the hourly deduction for this employee, falling back to
    /// `house_default` when no personal rate is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use tip_engine::models::{Employee, Role, DEFAULT_HOURLY_DEDUCTION};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Noa".to_string(),
    ///     role: Role::Waiter,
    ///     hourly_deduction_rate: None,
    ///     is_active: true,
    /// };
    /// assert_eq!(
    ///     employee.effective_deduction_rate(DEFAULT_HOURLY_DEDUCTION),
    ///     Decimal::new(20, 0)
    /// );
    /// ```
    pub fn effective_deduction_rate(&self, house_default: Decimal) -> Decimal {
        self.hourly_deduction_rate.unwrap_or(house_default)
    }
}

/// The fields an admin supplies when creating an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// The role the employee works in.
    pub role: Role,
    /// Optional personal hourly deduction.
    #[serde(default)]
    pub hourly_deduction_rate: Option<Decimal>,
}
