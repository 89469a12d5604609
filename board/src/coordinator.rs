//! Drag-transfer coordinator
//!
//! Turns a completed drag gesture into board mutations. The gesture is an
//! abstract `DragEvent` carrying source/destination column and index, so
//! any UI toolkit's drag events can be adapted to it.
//!
//! Outcomes:
//! - drop outside any column, or onto the slot it came from: cancelled,
//!   state untouched;
//! - within one column: a pure reorder;
//! - staging onto a day: promotion, where a routine is synthesized from the
//!   dragged spot (start and end default to the day's key), indexed, the
//!   column entry moves, and the spot leaves staging availability;
//! - day onto another day: the routine record relocates with its column
//!   entry, times preserved.
//!
//! Unknown columns or spots make the gesture a logged no-op; a stale index
//! aborts with `InvalidIndex` before anything is mutated, so the gesture
//! can visually revert.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::columns::ColumnId;
use crate::domain::{DateKey, Routine, Spot};
use crate::error::BoardError;
use crate::session::PlanningSession;

/// Where a drag ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTarget {
    pub column: ColumnId,
    pub index: usize,
}

/// A completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEvent {
    /// The spot id being dragged
    pub dragged_id: String,
    /// Column the drag started from
    pub source: ColumnId,
    /// Index within the source column
    pub source_index: usize,
    /// Drop target; None when the drop landed outside any column
    pub destination: Option<DragTarget>,
}

impl DragEvent {
    /// A drag dropped onto a column slot
    pub fn new(dragged_id: impl Into<String>, source: ColumnId, source_index: usize, dest: ColumnId, dest_index: usize) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            source,
            source_index,
            destination: Some(DragTarget {
                column: dest,
                index: dest_index,
            }),
        }
    }

    /// A drag dropped outside every column
    pub fn dropped_outside(dragged_id: impl Into<String>, source: ColumnId, source_index: usize) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            source,
            source_index,
            destination: None,
        }
    }
}

/// What a completed drag did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// True no-op: state is exactly as it was before the gesture
    Cancelled,

    /// Spots reordered within one column
    Reordered { column: ColumnId },

    /// A routine relocated between two days
    Moved { from: DateKey, to: DateKey },

    /// A staging spot became a dated routine
    Promoted { date: DateKey, routine_id: String },
}

impl PlanningSession {
    /// Apply a completed drag gesture.
    ///
    /// Synchronous and atomic from the caller's perspective: either the
    /// outcome fully applies or nothing was mutated.
    pub fn handle_drag_end(&mut self, event: DragEvent) -> Result<DragOutcome, BoardError> {
        let Some(dest) = event.destination else {
            debug!(dragged_id = %event.dragged_id, "handle_drag_end: dropped outside, cancelled");
            return Ok(DragOutcome::Cancelled);
        };

        if dest.column == event.source && dest.index == event.source_index {
            debug!(dragged_id = %event.dragged_id, "handle_drag_end: self-drop, cancelled");
            return Ok(DragOutcome::Cancelled);
        }

        if dest.column == event.source {
            self.columns
                .reorder_within_column(event.source, event.source_index, dest.index)?;
            return Ok(DragOutcome::Reordered { column: event.source });
        }

        match (event.source, dest.column) {
            (ColumnId::Staging, ColumnId::Day(date)) => self.promote(&event, date, dest.index),
            (ColumnId::Day(from), ColumnId::Day(to)) => self.relocate(&event, from, to, dest.index),
            (_, ColumnId::Staging) => {
                // Routines do not drag back into staging; unscheduling goes
                // through deletion.
                warn!(source = %event.source, "handle_drag_end: drop into staging not a transfer, cancelled");
                Ok(DragOutcome::Cancelled)
            }
        }
    }

    /// Delete a routine from the active date.
    ///
    /// Removes it from the routine index and from the day's column; if the
    /// routine originated from a staging spot, that spot returns to
    /// availability. Idempotent: unknown ids are a silent no-op. Manually
    /// added routines (`spot_id == None`) emit no registry notification.
    pub fn delete_routine(&mut self, routine_id: &str) -> Option<Routine> {
        let date = self.active_date()?;
        let removed = self.routines.remove_routine(date, routine_id)?;

        if let Some(spot_id) = &removed.spot_id {
            self.columns.remove_spot(ColumnId::Day(date), spot_id);
            self.spots.mark_unscheduled(spot_id);
        }

        debug!(%date, routine_id, promoted = removed.is_promoted(), "delete_routine: removed");
        Some(removed)
    }

    /// Promotion: staging spot dropped onto a day
    fn promote(&mut self, event: &DragEvent, date: DateKey, to_index: usize) -> Result<DragOutcome, BoardError> {
        let dest = ColumnId::Day(date);
        if let Err(e) = self.validate_transfer(event, dest, to_index) {
            return lenient(e);
        }

        let spot = match self.lookup_spot(&event.dragged_id) {
            Ok(spot) => spot.clone(),
            Err(e) => return lenient(e),
        };

        let routine = Routine::from_spot(&spot, date);
        let routine_id = routine.id.clone();
        self.routines.upsert_routine(date, routine);

        // Validated above; cannot fail here, so the upsert never dangles.
        self.columns
            .move_between_columns(event.source, dest, event.source_index, to_index, &event.dragged_id)?;
        self.spots.mark_scheduled(&spot.id);

        debug!(%date, spot_id = %spot.id, %routine_id, "promote: staging spot became routine");
        Ok(DragOutcome::Promoted { date, routine_id })
    }

    /// Relocation: routine dragged from one day onto another
    fn relocate(&mut self, event: &DragEvent, from: DateKey, to: DateKey, to_index: usize) -> Result<DragOutcome, BoardError> {
        let dest = ColumnId::Day(to);
        if let Err(e) = self.validate_transfer(event, dest, to_index) {
            return lenient(e);
        }

        let Some(routine) = self
            .routines
            .day(from)
            .iter()
            .find(|r| r.spot_id.as_deref() == Some(event.dragged_id.as_str()))
            .cloned()
        else {
            return lenient(BoardError::UnknownSpot(event.dragged_id.clone()));
        };

        self.routines.remove_routine(from, &routine.id);
        self.routines.upsert_routine(to, routine);
        self.columns
            .move_between_columns(event.source, dest, event.source_index, to_index, &event.dragged_id)?;

        debug!(%from, %to, spot_id = %event.dragged_id, "relocate: routine moved between days");
        Ok(DragOutcome::Moved { from, to })
    }

    /// Bounds-check a transfer before any store is touched
    fn validate_transfer(&self, event: &DragEvent, dest: ColumnId, to_index: usize) -> Result<(), BoardError> {
        let source = self
            .columns
            .get(event.source)
            .ok_or(BoardError::UnknownColumn(event.source))?;
        let dest_col = self.columns.get(dest).ok_or(BoardError::UnknownColumn(dest))?;

        if event.source_index >= source.len() {
            return Err(BoardError::InvalidIndex {
                column: event.source,
                index: event.source_index,
                len: source.len(),
            });
        }
        if to_index > dest_col.len() {
            return Err(BoardError::InvalidIndex {
                column: dest,
                index: to_index,
                len: dest_col.len(),
            });
        }
        if source.spot_ids[event.source_index] != event.dragged_id {
            return Err(BoardError::UnknownSpot(event.dragged_id.clone()));
        }
        Ok(())
    }

    fn lookup_spot(&self, spot_id: &str) -> Result<&Spot, BoardError> {
        self.spots
            .get(spot_id)
            .ok_or_else(|| BoardError::UnknownSpot(spot_id.to_string()))
    }
}

/// Unknown columns and spots cancel the gesture without surfacing a
/// blocking error; everything else propagates.
fn lenient(err: BoardError) -> Result<DragOutcome, BoardError> {
    if err.is_lenient() {
        warn!(error = %err, "drag transfer: lookup failed, treating as no-op");
        Ok(DragOutcome::Cancelled)
    } else {
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::session::PlanningSession;

    fn session_with_staging(spots: &[(&str, &str, Category)]) -> (PlanningSession, DateKey) {
        let date = DateKey::from_ymd(2024, 6, 1).unwrap();
        let mut session = PlanningSession::new("trip", "Taipei", vec![date, date.succ()]);
        for (id, location, category) in spots {
            session
                .add_spot(Spot::with_id(*id, *location, *category))
                .unwrap();
        }
        (session, date)
    }

    #[test]
    fn test_drop_outside_cancels_without_mutation() {
        let (mut session, _) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);
        let before = session.columns().get(ColumnId::Staging).unwrap().spot_ids.clone();

        let outcome = session
            .handle_drag_end(DragEvent::dropped_outside("s1", ColumnId::Staging, 0))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Cancelled);
        assert_eq!(session.columns().get(ColumnId::Staging).unwrap().spot_ids, before);
        assert!(session.routines().is_empty());
    }

    #[test]
    fn test_self_drop_is_cancelled() {
        let (mut session, _) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);
        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Staging, 0))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Cancelled);
    }

    #[test]
    fn test_same_column_reorder() {
        let (mut session, _) = session_with_staging(&[
            ("s1", "Cafe A", Category::Food),
            ("s2", "Night Market", Category::Shopping),
        ]);

        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Staging, 1))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Reordered { column: ColumnId::Staging });
        assert_eq!(session.columns().get(ColumnId::Staging).unwrap().spot_ids, vec!["s2", "s1"]);
        // A pure reorder touches no routine or spot record
        assert!(session.routines().is_empty());
        assert_eq!(session.spots().available().count(), 2);
    }

    #[test]
    fn test_promotion_scenario() {
        let (mut session, date) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);

        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(date), 0))
            .unwrap();

        let DragOutcome::Promoted { date: out_date, routine_id } = outcome else {
            panic!("Expected Promoted outcome");
        };
        assert_eq!(out_date, date);

        let day = session.routines().day(date);
        assert_eq!(day.len(), 1);
        let routine = &day[0];
        assert_eq!(routine.id, routine_id);
        assert_eq!(routine.spot_id.as_deref(), Some("s1"));
        assert_eq!(routine.category, Category::Food);
        assert_eq!(routine.location, "Cafe A");
        assert_eq!(routine.start, date.as_millis());
        assert_eq!(routine.end, date.as_millis());

        // Staging no longer holds s1; the day's column does
        assert!(!session.columns().get(ColumnId::Staging).unwrap().contains("s1"));
        assert!(session.columns().get(ColumnId::Day(date)).unwrap().contains("s1"));
        assert!(session.spots().get("s1").unwrap().is_scheduled);
    }

    #[test]
    fn test_promote_then_delete_round_trip() {
        let (mut session, date) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);

        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(date), 0))
            .unwrap();
        let DragOutcome::Promoted { routine_id, .. } = outcome else {
            panic!("Expected Promoted outcome");
        };

        session.set_active_date(date);
        let removed = session.delete_routine(&routine_id).unwrap();
        assert_eq!(removed.spot_id.as_deref(), Some("s1"));

        // The spot is available again and the day's column is restored
        assert!(!session.spots().get("s1").unwrap().is_scheduled);
        assert_eq!(session.spots().available().count(), 1);
        assert!(session.columns().get(ColumnId::Day(date)).unwrap().is_empty());
        assert!(session.routines().day(date).is_empty());
    }

    #[test]
    fn test_delete_manual_routine_emits_no_registry_notification() {
        let (mut session, date) = session_with_staging(&[]);
        let routine = Routine::new("Hotel Z", Category::Hotel, 100, 200);
        let routine_id = routine.id.clone();
        session.add_routine(date, routine);

        let mut rx = session.subscribe();
        session.set_active_date(date);
        let removed = session.delete_routine(&routine_id).unwrap();
        assert!(removed.spot_id.is_none());

        // Only the routine index changed; no spot event
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type(), "RoutinesChanged");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let (mut session, date) = session_with_staging(&[]);
        session.set_active_date(date);
        assert!(session.delete_routine("ghost").is_none());
    }

    #[test]
    fn test_stale_index_aborts_with_error() {
        let (mut session, date) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);

        let err = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 3, ColumnId::Day(date), 0))
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidIndex { .. }));
        // Aborted before any mutation
        assert!(session.routines().is_empty());
        assert_eq!(session.columns().get(ColumnId::Staging).unwrap().spot_ids, vec!["s1"]);
        assert!(!session.spots().get("s1").unwrap().is_scheduled);
    }

    #[test]
    fn test_unknown_destination_column_is_lenient_noop() {
        let (mut session, _) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);
        let stray = DateKey::from_ymd(2031, 1, 1).unwrap();

        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(stray), 0))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Cancelled);
        assert_eq!(session.columns().get(ColumnId::Staging).unwrap().spot_ids, vec!["s1"]);
    }

    #[test]
    fn test_day_to_day_relocation_keeps_times() {
        let (mut session, date) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);
        let next = date.succ();

        session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(date), 0))
            .unwrap();
        // Give the routine a real time before relocating
        let mut routine = session.routines().day(date)[0].clone();
        routine.start = date.as_millis() + 9 * 3600 * 1000;
        routine.end = date.as_millis() + 10 * 3600 * 1000;
        let (start, end) = (routine.start, routine.end);
        session.update_routine(date, routine);

        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Day(date), 0, ColumnId::Day(next), 0))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Moved { from: date, to: next });

        assert!(session.routines().day(date).is_empty());
        let moved = &session.routines().day(next)[0];
        assert_eq!((moved.start, moved.end), (start, end));
        assert!(session.columns().get(ColumnId::Day(date)).unwrap().is_empty());
        assert!(session.columns().get(ColumnId::Day(next)).unwrap().contains("s1"));
    }

    #[test]
    fn test_day_to_staging_is_cancelled() {
        let (mut session, date) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);
        session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(date), 0))
            .unwrap();

        let outcome = session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Day(date), 0, ColumnId::Staging, 0))
            .unwrap();
        assert_eq!(outcome, DragOutcome::Cancelled);
        assert!(session.columns().get(ColumnId::Day(date)).unwrap().contains("s1"));
    }

    #[test]
    fn test_promotion_is_exactly_once_per_spot_event() {
        let (mut session, date) = session_with_staging(&[("s1", "Cafe A", Category::Food)]);
        let mut rx = session.subscribe();

        session
            .handle_drag_end(DragEvent::new("s1", ColumnId::Staging, 0, ColumnId::Day(date), 0))
            .unwrap();

        let mut scheduled = 0;
        while let Ok(event) = rx.try_recv() {
            if event.event_type() == "SpotScheduled" {
                scheduled += 1;
            }
        }
        assert_eq!(scheduled, 1);
    }
}
