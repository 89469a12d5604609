//! Daily routine index and ordering engine
//!
//! Maps each day to the routines scheduled on it, in insertion order. The
//! chronological view (`order_by_start`) is derived on every read rather
//! than cached, so it can never go stale after arbitrary edits.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{DateKey, Routine};
use crate::events::BoardEmitter;

/// Mapping from date key to that day's routines, in insertion order
pub struct DailyRoutines {
    days: BTreeMap<DateKey, Vec<Routine>>,
    events: BoardEmitter,
}

impl DailyRoutines {
    /// Create an index with an empty routine list per day
    pub fn new(days: impl IntoIterator<Item = DateKey>, events: BoardEmitter) -> Self {
        let days = days.into_iter().map(|d| (d, Vec::new())).collect();
        Self { days, events }
    }

    /// The routines for a day, in insertion order
    pub fn day(&self, date: DateKey) -> &[Routine] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All days in the index, ascending
    pub fn dates(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.days.keys().copied()
    }

    /// Find a routine by id under a day
    pub fn find(&self, date: DateKey, routine_id: &str) -> Option<&Routine> {
        self.day(date).iter().find(|r| r.id == routine_id)
    }

    /// Insert or replace a routine by id under a day
    pub fn upsert_routine(&mut self, date: DateKey, routine: Routine) {
        let list = self.days.entry(date).or_default();
        match list.iter_mut().find(|r| r.id == routine.id) {
            Some(existing) => {
                debug!(%date, routine_id = %routine.id, "upsert_routine: replaced");
                *existing = routine;
            }
            None => {
                debug!(%date, routine_id = %routine.id, "upsert_routine: inserted");
                list.push(routine);
            }
        }
        self.events.routines_changed(date);
    }

    /// Remove a routine by id under a day.
    ///
    /// Idempotent: returns None and leaves state untouched when absent.
    pub fn remove_routine(&mut self, date: DateKey, routine_id: &str) -> Option<Routine> {
        let list = self.days.get_mut(&date)?;
        let pos = list.iter().position(|r| r.id == routine_id)?;
        let removed = list.remove(pos);
        debug!(%date, routine_id, "remove_routine: removed");
        self.events.routines_changed(date);
        Some(removed)
    }

    /// The day's routines sorted ascending by start time.
    ///
    /// Pure derive-on-read. The sort is stable: routines with equal start
    /// times keep their insertion order.
    pub fn order_by_start(&self, date: DateKey) -> Vec<Routine> {
        let mut ordered = self.day(date).to_vec();
        ordered.sort_by_key(|r| r.start);
        ordered
    }

    /// Total routine count across all days
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Whether no day has any routine
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot the index as a plain map (wire shape)
    pub fn to_map(&self) -> BTreeMap<DateKey, Vec<Routine>> {
        self.days.clone()
    }

    /// Rebuild the index from a plain map (wire shape)
    pub fn from_map(map: BTreeMap<DateKey, Vec<Routine>>, events: BoardEmitter) -> Self {
        Self { days: map, events }
    }
}
