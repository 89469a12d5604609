//! Spot registry
//!
//! Owns every spot known to the planning session and tracks whether each
//! one is currently scheduled. Spots are never deleted here: deleting a
//! routine returns its originating spot to availability instead.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::Spot;
use crate::events::BoardEmitter;

/// Mapping from spot id to spot attributes
pub struct SpotRegistry {
    spots: BTreeMap<String, Spot>,
    events: BoardEmitter,
}

impl SpotRegistry {
    /// Create an empty registry
    pub fn new(events: BoardEmitter) -> Self {
        Self {
            spots: BTreeMap::new(),
            events,
        }
    }

    /// Register a spot (replaces any previous record with the same id)
    pub fn insert(&mut self, spot: Spot) {
        debug!(spot_id = %spot.id, "SpotRegistry::insert");
        self.spots.insert(spot.id.clone(), spot);
    }

    /// Look up a spot by id
    pub fn get(&self, id: &str) -> Option<&Spot> {
        self.spots.get(id)
    }

    /// Spots still available in the staging pool
    pub fn available(&self) -> impl Iterator<Item = &Spot> {
        self.spots.values().filter(|s| !s.is_scheduled)
    }

    /// Number of registered spots
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Mark a spot as scheduled (leaves staging availability).
    ///
    /// Unknown ids are ignored: the notification is advisory.
    pub fn mark_scheduled(&mut self, id: &str) {
        if let Some(spot) = self.spots.get_mut(id) {
            spot.is_scheduled = true;
            self.events.spot_scheduled(id);
        } else {
            debug!(spot_id = id, "mark_scheduled: unknown spot, ignored");
        }
    }

    /// Mark a spot as unscheduled (returned to availability)
    pub fn mark_unscheduled(&mut self, id: &str) {
        if let Some(spot) = self.spots.get_mut(id) {
            spot.is_scheduled = false;
            self.events.spot_unscheduled(id);
        } else {
            debug!(spot_id = id, "mark_unscheduled: unknown spot, ignored");
        }
    }

    /// Iterate all spots
    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        self.spots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use crate::events::{BoardBus, BoardEvent};

    #[test]
    fn test_schedule_cycle() {
        let bus = BoardBus::default();
        let mut rx = bus.subscribe();
        let mut reg = SpotRegistry::new(bus.emitter());
        reg.insert(Spot::with_id("s1", "Cafe A", Category::Food));

        assert_eq!(reg.available().count(), 1);

        reg.mark_scheduled("s1");
        assert!(reg.get("s1").unwrap().is_scheduled);
        assert_eq!(reg.available().count(), 0);
        assert!(matches!(rx.try_recv().unwrap(), BoardEvent::SpotScheduled { .. }));

        reg.mark_unscheduled("s1");
        assert!(!reg.get("s1").unwrap().is_scheduled);
        assert_eq!(reg.available().count(), 1);
        assert!(matches!(rx.try_recv().unwrap(), BoardEvent::SpotUnscheduled { .. }));
    }

    #[test]
    fn test_unknown_spot_emits_nothing() {
        let bus = BoardBus::default();
        let mut rx = bus.subscribe();
        let mut reg = SpotRegistry::new(bus.emitter());

        reg.mark_scheduled("ghost");
        reg.mark_unscheduled("ghost");
        assert!(rx.try_recv().is_err());
    }
}
