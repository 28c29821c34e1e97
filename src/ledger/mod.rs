//! Durable record of finalized shifts.
//!
//! The [`ShiftLedger`] stores one [`Shift`] per calendar date, applies edits,
//! and answers the date-range, per-employee and monthly queries. The backing
//! store is pluggable through [`ShiftStore`]; [`InMemoryShiftStore`] is the
//! default.

mod report;
mod store;

pub use report::{average_per_hour, month_bounds, summarize_employee, summarize_month};
pub use store::{InMemoryShiftStore, ShiftStore};

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeePeriodReport, MonthlyReport, Shift, ShiftPatch};

/// The shift ledger, generic over its backing store.
#[derive(Debug, Default)]
pub struct ShiftLedger<S: ShiftStore = InMemoryShiftStore> {
    store: S,
}

impl<S: ShiftStore> ShiftLedger<S> {
    /// Creates a ledger over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persists a finalized shift.
    ///
    /// # Returns
    ///
    /// Returns the stored shift, or an error if:
    /// - The payouts plus leftover do not equal the pool (`InvalidInput`)
    /// - A shift already exists for the date (`DuplicateShift`)
    /// - The store fails (`Persistence`)
    pub async fn save(&self, shift: Shift) -> EngineResult<Shift> {
        if !shift.is_balanced() {
            return Err(EngineError::invalid_input(
                "employees",
                "payouts plus leftover must equal the distributable pool",
            ));
        }

        let date = shift.date;
        match self.store.insert_unique(shift).await {
            Ok(saved) => {
                info!(
                    shift_id = %saved.id,
                    date = %saved.date,
                    employees = saved.employees.len(),
                    "Saved shift"
                );
                Ok(saved)
            }
            Err(e) => {
                warn!(date = %date, error = %e, "Failed to save shift");
                Err(e)
            }
        }
    }

    /// Replaces a shift's computed content with `patch`.
    ///
    /// The patch is stored as supplied; the caller re-runs the calculation
    /// before updating. Moving a shift onto a date held by another shift is
    /// rejected with `DuplicateShift`.
    pub async fn update(&self, shift_id: Uuid, patch: ShiftPatch) -> EngineResult<Shift> {
        if !patch.is_balanced() {
            return Err(EngineError::invalid_input(
                "employees",
                "payouts plus leftover must equal the distributable pool",
            ));
        }

        let updated = self.store.apply_patch(shift_id, patch, Utc::now()).await?;
        info!(shift_id = %updated.id, date = %updated.date, "Updated shift");
        Ok(updated)
    }

    /// Fetches a shift by id.
    pub async fn get(&self, shift_id: Uuid) -> EngineResult<Shift> {
        self.store
            .get(shift_id)
            .await?
            .ok_or_else(|| EngineError::ShiftNotFound {
                shift_id: shift_id.to_string(),
            })
    }

    /// Fetches the shift for a date, if one exists.
    pub async fn get_by_date(&self, date: NaiveDate) -> EngineResult<Option<Shift>> {
        self.store.find_by_date(date).await
    }

    /// Returns shifts with `start <= date <= end`, ascending by date.
    ///
    /// A reversed range is swapped rather than rejected.
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Shift>> {
        let (start, end) = ordered(start, end);
        self.store.range(start, end).await
    }

    /// Returns the shifts in range that `employee_id` worked.
    pub async fn get_by_employee(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<Shift>> {
        let shifts = self.get_by_date_range(start, end).await?;
        Ok(shifts
            .into_iter()
            .filter(|shift| shift.allocation_for(employee_id).is_some())
            .collect())
    }

    /// Builds one employee's lines and totals over a date range.
    pub async fn get_employee_report(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<EmployeePeriodReport> {
        let (start, end) = ordered(start, end);
        let shifts = self.get_by_employee(employee_id, start, end).await?;
        Ok(summarize_employee(employee_id, start, end, &shifts))
    }

    /// Builds the monthly per-employee summary.
    pub async fn get_monthly_report(&self, year: i32, month: u32) -> EngineResult<MonthlyReport> {
        let (first, last) = month_bounds(year, month)?;
        let shifts = self.store.range(first, last).await?;
        Ok(summarize_month(year, month, &shifts))
    }
}

impl ShiftLedger<InMemoryShiftStore> {
    /// Creates a ledger over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryShiftStore::new())
    }
}

fn ordered(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    if start > end { (end, start) } else { (start, end) }
}
