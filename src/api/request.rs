//! Request types for the Tip Distribution Engine API.
//!
//! This module defines the JSON request bodies and query strings accepted
//! by the shift, employee and report endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_amount, parse_hours};
use crate::error::EngineResult;
use crate::models::{NewEmployee, RosterEntry, Role, ShiftInput};

/// Request body for calculating, saving or editing a shift.
///
/// Amounts and hours are the raw text of the admin form and go through
/// strict parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateShiftRequest {
    /// The calendar day of the shift.
    pub date: NaiveDate,
    /// Cash gratuities collected.
    pub cash_tips: String,
    /// Card/credit gratuities collected.
    pub credit_tips: String,
    /// Who worked and for how long.
    pub roster: Vec<RosterEntryRequest>,
    /// The admin performing the save or edit; ignored for previews.
    #[serde(default = "default_actor")]
    pub performed_by: String,
}

fn default_actor() -> String {
    "admin".to_string()
}

/// One roster line in a shift request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntryRequest {
    /// The employee who worked.
    pub employee_id: String,
    /// Hours worked.
    pub hours: String,
}

impl CalculateShiftRequest {
    /// Parses the form fields into the calculation input and returns it with
    /// the actor.
    pub fn into_parts(self) -> EngineResult<(ShiftInput, String)> {
        let roster = self
            .roster
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let hours = parse_hours(&format!("roster[{}].hours", i), &entry.hours)?;
                Ok(RosterEntry::new(entry.employee_id, hours))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let input = ShiftInput {
            date: self.date,
            cash_tips: parse_amount("cash_tips", &self.cash_tips)?,
            credit_tips: parse_amount("credit_tips", &self.credit_tips)?,
            roster,
        };
        Ok((input, self.performed_by))
    }
}

/// Request body for registering an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Floor role.
    pub role: Role,
    /// Per-hour deduction; the house default applies when omitted.
    #[serde(default)]
    pub hourly_deduction_rate: Option<Decimal>,
}

impl From<NewEmployeeRequest> for NewEmployee {
    fn from(req: NewEmployeeRequest) -> Self {
        NewEmployee {
            name: req.name,
            role: req.role,
            hourly_deduction_rate: req.hourly_deduction_rate,
        }
    }
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeListQuery {
    /// Include deactivated employees.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Inclusive date range query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRangeQuery {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}
