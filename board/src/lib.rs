//! PlanBoard - in-memory itinerary planning board
//!
//! The core state model behind a day-by-day travel planner: users collect
//! spots (hotels, food, attractions, shopping) in a staging pool and drag
//! them onto dated columns, where each spot becomes a timed routine.
//!
//! # Core Concepts
//!
//! - **Single Writer**: all mutation happens on one thread in response to
//!   discrete user gestures; there is no locking and no partial failure
//! - **Derive, Don't Cache**: the chronological day view is recomputed on
//!   every read, so it can never observe a stale routine set
//! - **Fire-and-Forget Events**: every mutation is announced on a
//!   broadcast bus; persistence and post-it observers subscribe, and the
//!   core never waits for them
//!
//! # Modules
//!
//! - [`domain`] - Spot, Routine, Category, DateKey record types
//! - [`columns`] - ordered spot-id lanes (staging pool + one per day)
//! - [`routines`] - daily routine index and the order-by-start view
//! - [`spots`] - spot registry with scheduled/unscheduled tracking
//! - [`session`] - one schedule's board state (active date, edit target)
//! - [`coordinator`] - the drag-transfer state machine
//! - [`events`] - the board event bus

pub mod columns;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod events;
pub mod routines;
pub mod session;
pub mod spots;

// Re-export commonly used types
pub use columns::{Column, ColumnId, ColumnStore};
pub use coordinator::{DragEvent, DragOutcome, DragTarget};
pub use domain::{Category, DateKey, Routine, Spot, generate_id};
pub use error::BoardError;
pub use events::{BoardBus, BoardEmitter, BoardEvent};
pub use routines::DailyRoutines;
pub use session::{EditTarget, PlanningSession};
pub use spots::SpotRegistry;
