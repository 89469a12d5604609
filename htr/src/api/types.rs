//! Wire types for the schedule and auth services
//!
//! Field names match the services' JSON exactly (camelCase, `postItId`,
//! millisecond date keys rendered as object keys), so a payload fetched
//! from the service round-trips byte-compatible through these types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use planboard::{DateKey, Routine, Spot};

/// The `{ok, message}` envelope mutating endpoints answer with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,
    #[serde(default)]
    pub message: String,
}

/// One full schedule as the service stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    /// Trip title
    pub schedule_name: String,

    /// Destination (city or region)
    pub location: String,

    /// Routines per day, keyed by the day's millisecond timestamp.
    /// serde_json renders the integer keys as strings, which is the
    /// service's object-of-arrays shape.
    pub daily_routines: BTreeMap<DateKey, Vec<Routine>>,

    /// Every day of the trip, in order
    pub date_range: Vec<DateKey>,

    /// Whether the user marked the trip as planned-out
    pub is_finished: bool,

    /// All spots the user collected, scheduled or not
    pub spots: Vec<Spot>,

    /// Staging-pool display order (spot ids)
    pub spots_id: Vec<String>,

    /// Map pins, passed through untouched
    #[serde(default)]
    pub markers: serde_json::Value,
}

/// A stored schedule: payload plus server-assigned identity
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleRecord {
    pub id: i64,

    #[serde(rename = "UserId")]
    pub user_id: i64,

    #[serde(flatten)]
    pub payload: SchedulePayload,
}

/// Registration request body (`common` method)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub email: String,
}

/// Login request body (`common` method)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The user identity the auth service echoes back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
}

/// A successful registration or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: CurrentUser,
    /// Opaque bearer token; never inspected locally
    pub token: String,
}

/// Raw auth endpoint response before the envelope is checked
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "userData", default)]
    pub user_data: Option<CurrentUser>,
    #[serde(default)]
    pub token: Option<String>,
}
