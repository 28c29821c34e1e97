//! Backing store abstraction for the shift ledger.
//!
//! A store keeps whole shift records and enforces the one-shift-per-date
//! unique key itself: the existence check and the write happen as one
//! atomic operation, so two concurrent saves for the same date cannot both
//! succeed.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Shift, ShiftPatch};

/// Persistence operations the ledger needs.
///
/// Implementations must write each shift as a single record and must report
/// a second shift for an occupied date as [`EngineError::DuplicateShift`]
/// rather than overwriting. Store failures are reported as
/// [`EngineError::Persistence`].
pub trait ShiftStore: Send + Sync {
    /// Inserts a shift if no shift holds its date yet.
    fn insert_unique(&self, shift: Shift) -> impl Future<Output = EngineResult<Shift>> + Send;

    /// Applies `patch` to the shift with `id`, checking the date key.
    fn apply_patch(
        &self,
        id: Uuid,
        patch: ShiftPatch,
        updated_at: DateTime<Utc>,
    ) -> impl Future<Output = EngineResult<Shift>> + Send;

    /// Fetches a shift by id.
    fn get(&self, id: Uuid) -> impl Future<Output = EngineResult<Option<Shift>>> + Send;

    /// Fetches the shift held by `date`, if any.
    fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = EngineResult<Option<Shift>>> + Send;

    /// Returns shifts with `start <= date <= end`, ascending by date.
    fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = EngineResult<Vec<Shift>>> + Send;
}

#[derive(Debug, Default)]
struct StoreState {
    shifts: HashMap<Uuid, Shift>,
    by_date: BTreeMap<NaiveDate, Uuid>,
}

/// A process-local store guarded by a single `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryShiftStore {
    state: RwLock<StoreState>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored shifts.
    pub async fn len(&self) -> usize {
        self.state.read().await.shifts.len()
    }

    /// Returns true when no shift is stored.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.shifts.is_empty()
    }
}

impl ShiftStore for InMemoryShiftStore {
    async fn insert_unique(&self, shift: Shift) -> EngineResult<Shift> {
        let mut state = self.state.write().await;
        if state.by_date.contains_key(&shift.date) {
            return Err(EngineError::DuplicateShift { date: shift.date });
        }
        if state.shifts.contains_key(&shift.id) {
            return Err(EngineError::Persistence {
                message: format!("shift id {} already exists", shift.id),
            });
        }
        state.by_date.insert(shift.date, shift.id);
        state.shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: ShiftPatch,
        updated_at: DateTime<Utc>,
    ) -> EngineResult<Shift> {
        let mut state = self.state.write().await;
        let StoreState { shifts, by_date } = &mut *state;

        let shift = shifts.get_mut(&id).ok_or_else(|| EngineError::ShiftNotFound {
            shift_id: id.to_string(),
        })?;

        if patch.date != shift.date {
            if by_date.contains_key(&patch.date) {
                return Err(EngineError::DuplicateShift { date: patch.date });
            }
            by_date.remove(&shift.date);
            by_date.insert(patch.date, id);
        }

        shift.apply_patch(patch, updated_at);
        Ok(shift.clone())
    }

    async fn get(&self, id: Uuid) -> EngineResult<Option<Shift>> {
        Ok(self.state.read().await.shifts.get(&id).cloned())
    }

    async fn find_by_date(&self, date: NaiveDate) -> EngineResult<Option<Shift>> {
        let state = self.state.read().await;
        Ok(state
            .by_date
            .get(&date)
            .and_then(|id| state.shifts.get(id))
            .cloned())
    }

    async fn range(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<Shift>> {
        let state = self.state.read().await;
        Ok(state
            .by_date
            .range(start..=end)
            .filter_map(|(_, id)| state.shifts.get(id))
            .cloned()
            .collect())
    }
}
