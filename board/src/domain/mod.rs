//! Domain types for the planning board
//!
//! Core record types: Spot (a point of interest in the staging pool) and
//! Routine (a spot placed into a calendar day with a time range), plus the
//! DateKey day keys the board is organized around.

mod date;
mod id;
mod routine;
mod spot;

pub use date::DateKey;
pub use id::generate_id;
pub use routine::Routine;
pub use spot::{Category, Spot};
