//! Column store
//!
//! Columns are the draggable lanes of the planning board: the staging pool
//! of not-yet-scheduled spots plus one lane per calendar day. Each column
//! holds an ordered sequence of spot ids; order is display order.
//!
//! Mutations bounds-check everything before touching state, so a failed
//! call never needs rollback. Successful mutations emit `ColumnChanged`
//! for every affected column.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::DateKey;
use crate::error::BoardError;
use crate::events::BoardEmitter;

/// String id of the staging column on the wire (the original droppable id)
const STAGING_KEY: &str = "postIt";

/// Identifier of a column: the staging pool or one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnId {
    /// The pool of unscheduled spots
    Staging,
    /// The lane for one calendar day
    Day(DateKey),
}

impl ColumnId {
    /// Whether this is a dated lane
    pub fn is_day(&self) -> bool {
        matches!(self, Self::Day(_))
    }

    /// The day key, for dated lanes
    pub fn date(&self) -> Option<DateKey> {
        match self {
            Self::Day(date) => Some(*date),
            Self::Staging => None,
        }
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Staging => write!(f, "{}", STAGING_KEY),
            Self::Day(date) => write!(f, "{}", date),
        }
    }
}

impl std::str::FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == STAGING_KEY {
            return Ok(Self::Staging);
        }
        s.parse::<DateKey>()
            .map(Self::Day)
            .map_err(|_| format!("Unknown column id: {}", s))
    }
}

impl serde::Serialize for ColumnId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ColumnId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One draggable lane: an ordered sequence of spot ids
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: ColumnId,
    pub spot_ids: Vec<String>,
}

impl Column {
    /// Create an empty column
    pub fn new(id: ColumnId) -> Self {
        Self { id, spot_ids: Vec::new() }
    }

    /// Number of spots in the column
    pub fn len(&self) -> usize {
        self.spot_ids.len()
    }

    /// Whether the column is empty
    pub fn is_empty(&self) -> bool {
        self.spot_ids.is_empty()
    }

    /// Whether the column references a spot id
    pub fn contains(&self, spot_id: &str) -> bool {
        self.spot_ids.iter().any(|id| id == spot_id)
    }
}

/// Mapping from column id to its ordered spot-id sequence
pub struct ColumnStore {
    columns: BTreeMap<ColumnId, Column>,
    events: BoardEmitter,
}

impl ColumnStore {
    /// Create a store with a staging column and one lane per day
    pub fn new(days: impl IntoIterator<Item = DateKey>, events: BoardEmitter) -> Self {
        let mut columns = BTreeMap::new();
        columns.insert(ColumnId::Staging, Column::new(ColumnId::Staging));
        for day in days {
            let id = ColumnId::Day(day);
            columns.insert(id, Column::new(id));
        }
        Self { columns, events }
    }

    /// Look up a column
    pub fn get(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(&id)
    }

    /// Look up a column, failing with `UnknownColumn`
    fn get_required(&self, id: ColumnId) -> Result<&Column, BoardError> {
        self.columns.get(&id).ok_or(BoardError::UnknownColumn(id))
    }

    /// Add a lane for a day (no-op if present)
    pub fn ensure_day(&mut self, date: DateKey) {
        let id = ColumnId::Day(date);
        self.columns.entry(id).or_insert_with(|| Column::new(id));
    }

    /// Append a spot id to the end of a column
    pub fn push_spot(&mut self, column: ColumnId, spot_id: impl Into<String>) -> Result<(), BoardError> {
        let col = self
            .columns
            .get_mut(&column)
            .ok_or(BoardError::UnknownColumn(column))?;
        col.spot_ids.push(spot_id.into());
        self.events.column_changed(column);
        Ok(())
    }

    /// Move the spot id at `from` to position `to` within the same column.
    ///
    /// Both indices must be in `[0, len)`. A self-drop (`from == to`) is an
    /// idempotent no-op and emits nothing.
    pub fn reorder_within_column(&mut self, column: ColumnId, from: usize, to: usize) -> Result<(), BoardError> {
        let len = self.get_required(column)?.len();
        if from >= len {
            return Err(BoardError::InvalidIndex { column, index: from, len });
        }
        if to >= len {
            return Err(BoardError::InvalidIndex { column, index: to, len });
        }
        if from == to {
            debug!(%column, from, "reorder_within_column: self-drop, no-op");
            return Ok(());
        }

        let col = self.columns.get_mut(&column).ok_or(BoardError::UnknownColumn(column))?;
        let spot_id = col.spot_ids.remove(from);
        col.spot_ids.insert(to, spot_id);

        debug!(%column, from, to, "reorder_within_column: reordered");
        self.events.column_changed(column);
        Ok(())
    }

    /// Remove `spot_id` from `source` at `from` and insert it into `dest`
    /// at `to`.
    ///
    /// `from` must index an existing entry; `to` is an insertion index in
    /// `[0, dest.len]`. The id actually found at `from` must match
    /// `spot_id`, guarding against stale indices from a gesture that
    /// resolved after a concurrent mutation. All checks happen before any
    /// mutation.
    pub fn move_between_columns(
        &mut self,
        source: ColumnId,
        dest: ColumnId,
        from: usize,
        to: usize,
        spot_id: &str,
    ) -> Result<(), BoardError> {
        let source_len = self.get_required(source)?.len();
        let dest_len = self.get_required(dest)?.len();
        if from >= source_len {
            return Err(BoardError::InvalidIndex {
                column: source,
                index: from,
                len: source_len,
            });
        }
        if to > dest_len {
            return Err(BoardError::InvalidIndex {
                column: dest,
                index: to,
                len: dest_len,
            });
        }
        if self.get_required(source)?.spot_ids[from] != spot_id {
            return Err(BoardError::UnknownSpot(spot_id.to_string()));
        }

        let moved = self
            .columns
            .get_mut(&source)
            .ok_or(BoardError::UnknownColumn(source))?
            .spot_ids
            .remove(from);
        self.columns
            .get_mut(&dest)
            .ok_or(BoardError::UnknownColumn(dest))?
            .spot_ids
            .insert(to, moved);

        debug!(%source, %dest, from, to, spot_id, "move_between_columns: moved");
        self.events.column_changed(source);
        self.events.column_changed(dest);
        Ok(())
    }

    /// Remove a spot id from a column wherever it sits.
    ///
    /// Silent no-op (returns false) when the column or the id is absent;
    /// deletion must stay idempotent.
    pub fn remove_spot(&mut self, column: ColumnId, spot_id: &str) -> bool {
        let Some(col) = self.columns.get_mut(&column) else {
            return false;
        };
        let Some(pos) = col.spot_ids.iter().position(|id| id == spot_id) else {
            return false;
        };
        col.spot_ids.remove(pos);
        self.events.column_changed(column);
        true
    }

    /// Iterate all columns
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }
}
