//! HitTheRoad - day-by-day travel itinerary planner
//!
//! The application layer around the [`planboard`] core: configuration,
//! the schedule/auth service clients, the persisted login session,
//! board ↔ wire conversion, and the `htr` CLI.
//!
//! # Modules
//!
//! - [`api`] - schedule and auth service clients, wire types, stored session
//! - [`config`] - YAML configuration with a fallback chain
//! - [`sync`] - board snapshots to payloads and fire-and-forget pushes
//! - [`cli`] - clap command definitions

pub mod api;
pub mod cli;
pub mod config;
pub mod sync;

pub use api::{ApiError, AuthClient, AuthMethod, ScheduleClient, StoredSession};
pub use config::Config;
