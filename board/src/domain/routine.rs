//! Routine records
//!
//! A Routine is a spot placed into a specific day with a start/end time.
//! Routines synthesized by a drag out of staging keep a back-reference to
//! their originating spot (`postItId` on the wire); manually added routines
//! carry no such reference.

use serde::{Deserialize, Serialize};

use super::date::DateKey;
use super::id::generate_id;
use super::spot::{Category, Spot};

/// A scheduled itinerary entry on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    /// Unique identifier
    pub id: String,

    /// Originating spot, when the routine came from the staging pool
    #[serde(rename = "postItId", default, skip_serializing_if = "Option::is_none")]
    pub spot_id: Option<String>,

    /// Place name
    pub location: String,

    /// Place kind
    pub category: Category,

    /// Free-form note
    #[serde(default)]
    pub memo: String,

    /// Start time (Unix ms)
    pub start: i64,

    /// End time (Unix ms)
    pub end: i64,
}

impl Routine {
    /// Create a manually added routine with explicit times
    pub fn new(location: impl Into<String>, category: Category, start: i64, end: i64) -> Self {
        let location = location.into();
        Self {
            id: generate_id("routine", &location),
            spot_id: None,
            location,
            category,
            memo: String::new(),
            start,
            end,
        }
    }

    /// Synthesize the promotion routine for a spot dropped onto a day.
    ///
    /// Both start and end default to the destination day's raw key: the
    /// routine reads as all-day/unset time until the user edits it. This
    /// defaulting is part of the persisted behavior and must not change.
    pub fn from_spot(spot: &Spot, date: DateKey) -> Self {
        Self {
            id: generate_id("routine", &spot.location),
            spot_id: Some(spot.id.clone()),
            location: spot.location.clone(),
            category: spot.category,
            memo: spot.memo.clone(),
            start: date.as_millis(),
            end: date.as_millis(),
        }
    }

    /// Attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Whether the routine originated from the staging pool
    pub fn is_promoted(&self) -> bool {
        self.spot_id.is_some()
    }
}
