//! Clients for the external schedule and auth services
//!
//! Both services speak JSON over HTTP. Mutating endpoints answer with an
//! `{ok, message}` envelope; `ok: false` is a recoverable rejection (wrong
//! password, duplicate user, validation failure) that surfaces as
//! [`ApiError::Rejected`] and is reported to the user, never a crash.

pub mod auth;
pub mod schedule;
pub mod session;
pub mod types;

pub use auth::{AuthClient, AuthMethod};
pub use schedule::ScheduleClient;
pub use session::StoredSession;
pub use types::{AuthSession, CurrentUser, Envelope, LoginRequest, RegisterRequest, ScheduleRecord, SchedulePayload};

use thiserror::Error;

/// Errors from the schedule/auth service clients
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body did not parse as the expected JSON shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The service answered `ok: false`
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Non-success HTTP status after retries were exhausted
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// No stored login session for a call that needs one
    #[error("Not logged in")]
    NotLoggedIn,
}

impl ApiError {
    /// Whether the failure is a user-facing rejection rather than a fault
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Maximum backoff growth base for transient errors
pub(crate) const INITIAL_BACKOFF_MS: u64 = 1000;
