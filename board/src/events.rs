//! Board event bus
//!
//! Every mutation of the board emits an event here. Consumers (the
//! persistence sync layer, the post-it subsystem) subscribe; emitting with
//! no subscribers is a no-op, so the core never blocks on its observers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::columns::ColumnId;
use crate::domain::DateKey;

/// Default channel capacity (events)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// The vocabulary of observable board activity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoardEvent {
    /// A column's spot-id sequence changed (reorder or cross-column move)
    ColumnChanged { column: ColumnId },

    /// The routine set for a day changed (upsert, remove, relocation)
    RoutinesChanged { date: DateKey },

    /// A spot left the staging pool for a dated routine
    SpotScheduled { spot_id: String },

    /// A spot returned to staging availability after its routine was deleted
    SpotUnscheduled { spot_id: String },
}

impl BoardEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ColumnChanged { .. } => "ColumnChanged",
            Self::RoutinesChanged { .. } => "RoutinesChanged",
            Self::SpotScheduled { .. } => "SpotScheduled",
            Self::SpotUnscheduled { .. } => "SpotUnscheduled",
        }
    }
}

/// Central event bus for board activity
pub struct BoardBus {
    tx: broadcast::Sender<BoardEvent>,
}

impl BoardBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "BoardBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers
    ///
    /// Fire-and-forget: if there are no subscribers the event is dropped.
    pub fn emit(&self, event: BoardEvent) {
        debug!(event_type = event.event_type(), "BoardBus::emit");
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        debug!("BoardBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Create a cheap-to-clone emitter handle for a store component
    pub fn emitter(&self) -> BoardEmitter {
        BoardEmitter { tx: self.tx.clone() }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BoardBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// Handle for store components to emit events without owning the bus
#[derive(Clone)]
pub struct BoardEmitter {
    tx: broadcast::Sender<BoardEvent>,
}

impl BoardEmitter {
    /// Emit a raw event
    pub fn emit(&self, event: BoardEvent) {
        debug!(event_type = event.event_type(), "BoardEmitter::emit");
        let _ = self.tx.send(event);
    }

    /// Emit a column-changed notification
    pub fn column_changed(&self, column: ColumnId) {
        self.emit(BoardEvent::ColumnChanged { column });
    }

    /// Emit a routines-changed notification
    pub fn routines_changed(&self, date: DateKey) {
        self.emit(BoardEvent::RoutinesChanged { date });
    }

    /// Emit a spot-scheduled notification
    pub fn spot_scheduled(&self, spot_id: &str) {
        self.emit(BoardEvent::SpotScheduled {
            spot_id: spot_id.to_string(),
        });
    }

    /// Emit a spot-unscheduled notification
    pub fn spot_unscheduled(&self, spot_id: &str) {
        self.emit(BoardEvent::SpotUnscheduled {
            spot_id: spot_id.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let bus = BoardBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        // Must not panic
        bus.emit(BoardEvent::SpotScheduled {
            spot_id: "s1".to_string(),
        });
    }

    #[test]
    fn test_emitter_delivers_to_subscriber() {
        let bus = BoardBus::new(16);
        let mut rx = bus.subscribe();
        let emitter = bus.emitter();

        emitter.column_changed(ColumnId::Staging);
        emitter.spot_unscheduled("s1");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type(), "ColumnChanged");
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type(), "SpotUnscheduled");
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_event_serialization() {
        let event = BoardEvent::RoutinesChanged {
            date: DateKey::from_millis(1_717_200_000_000),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RoutinesChanged"));

        let parsed: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "RoutinesChanged");
    }
}
