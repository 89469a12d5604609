//! Planning session
//!
//! A `PlanningSession` owns one schedule's board state: the spot registry,
//! the column store, the daily routine index, the active date, and the
//! edit target. All mutation happens on the caller's thread in response to
//! discrete gestures; there is no interior locking because there is no
//! concurrent writer.

use std::collections::BTreeMap;

use tokio::sync::broadcast;
use tracing::debug;

use crate::columns::{ColumnId, ColumnStore};
use crate::domain::{DateKey, Routine, Spot};
use crate::error::BoardError;
use crate::events::{BoardBus, BoardEvent};
use crate::routines::DailyRoutines;
use crate::spots::SpotRegistry;

/// What the user currently has open for editing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditTarget {
    /// Nothing open
    #[default]
    None,
    /// The add-routine form
    Add,
    /// An existing routine, by id
    Routine(String),
}

/// One schedule's in-memory board state
pub struct PlanningSession {
    pub(crate) bus: BoardBus,
    pub(crate) spots: SpotRegistry,
    pub(crate) columns: ColumnStore,
    pub(crate) routines: DailyRoutines,

    schedule_name: String,
    location: String,
    date_range: Vec<DateKey>,
    is_finished: bool,

    active_date: Option<DateKey>,
    edit: EditTarget,
}

impl PlanningSession {
    /// Create a fresh session for a trip spanning `date_range`.
    ///
    /// One column per day plus the staging pool; the first day becomes the
    /// active date.
    pub fn new(
        schedule_name: impl Into<String>,
        location: impl Into<String>,
        date_range: Vec<DateKey>,
    ) -> Self {
        let bus = BoardBus::default();
        let spots = SpotRegistry::new(bus.emitter());
        let columns = ColumnStore::new(date_range.iter().copied(), bus.emitter());
        let routines = DailyRoutines::new(date_range.iter().copied(), bus.emitter());
        let active_date = date_range.first().copied();

        Self {
            bus,
            spots,
            columns,
            routines,
            schedule_name: schedule_name.into(),
            location: location.into(),
            date_range,
            is_finished: false,
            active_date,
            edit: EditTarget::None,
        }
    }

    /// Rebuild a session from previously persisted parts.
    ///
    /// Day columns are re-derived from the routine index (one entry per
    /// promoted routine, in insertion order); the staging column follows
    /// the stored staging order.
    pub fn from_parts(
        schedule_name: impl Into<String>,
        location: impl Into<String>,
        date_range: Vec<DateKey>,
        is_finished: bool,
        spots: Vec<Spot>,
        staging_order: Vec<String>,
        daily: BTreeMap<DateKey, Vec<Routine>>,
    ) -> Self {
        let mut session = Self::new(schedule_name, location, date_range);
        session.is_finished = is_finished;

        for spot in spots {
            session.spots.insert(spot);
        }
        for spot_id in staging_order {
            let _ = session.columns.push_spot(ColumnId::Staging, spot_id);
        }
        for (date, list) in daily {
            session.columns.ensure_day(date);
            for routine in list {
                if let Some(spot_id) = &routine.spot_id {
                    let _ = session.columns.push_spot(ColumnId::Day(date), spot_id.clone());
                }
                session.routines.upsert_routine(date, routine);
            }
        }
        session
    }

    // === Navigation & editing ===

    /// The date currently displayed
    pub fn active_date(&self) -> Option<DateKey> {
        self.active_date
    }

    /// Navigate to a date. Changing the active date closes any open edit.
    pub fn set_active_date(&mut self, date: DateKey) {
        if self.active_date == Some(date) {
            return;
        }
        debug!(%date, "set_active_date");
        self.active_date = Some(date);
        self.edit = EditTarget::None;
    }

    /// The current edit target
    pub fn edit_target(&self) -> &EditTarget {
        &self.edit
    }

    /// Toggle an edit target: selecting the already-open target closes it.
    pub fn toggle_edit(&mut self, target: EditTarget) {
        if self.edit == target {
            self.edit = EditTarget::None;
        } else {
            self.edit = target;
        }
    }

    // === Board content ===

    /// Register a new spot and place it at the end of the staging pool
    pub fn add_spot(&mut self, spot: Spot) -> Result<(), BoardError> {
        let id = spot.id.clone();
        self.spots.insert(spot);
        self.columns.push_spot(ColumnId::Staging, id)
    }

    /// Manually add a routine to a day (no staging spot involved)
    pub fn add_routine(&mut self, date: DateKey, routine: Routine) {
        self.routines.upsert_routine(date, routine);
    }

    /// Replace an existing routine's fields (times, memo, location)
    pub fn update_routine(&mut self, date: DateKey, routine: Routine) {
        self.routines.upsert_routine(date, routine);
    }

    /// The active day's routines in chronological order
    pub fn ordered_routines(&self) -> Vec<Routine> {
        match self.active_date {
            Some(date) => self.routines.order_by_start(date),
            None => Vec::new(),
        }
    }

    // === Accessors ===

    pub fn schedule_name(&self) -> &str {
        &self.schedule_name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date_range(&self) -> &[DateKey] {
        &self.date_range
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn set_finished(&mut self, finished: bool) {
        self.is_finished = finished;
    }

    pub fn spots(&self) -> &SpotRegistry {
        &self.spots
    }

    pub fn columns(&self) -> &ColumnStore {
        &self.columns
    }

    pub fn routines(&self) -> &DailyRoutines {
        &self.routines
    }

    /// Subscribe to board events (persistence triggers, post-it updates)
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.bus.subscribe()
    }
}
