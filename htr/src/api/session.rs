//! Stored login session
//!
//! The current user and bearer token persisted as JSON under the data
//! directory. Every schedule call is scoped by this explicit value; there
//! is no ambient global user.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::types::{AuthSession, CurrentUser};

const SESSION_FILE: &str = "session.json";

/// The persisted login: who is logged in and their token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub user: CurrentUser,
    pub token: String,
}

impl From<AuthSession> for StoredSession {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

impl StoredSession {
    fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(SESSION_FILE)
    }

    /// Load the stored session, or None when nobody is logged in
    pub fn load(data_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path(data_dir);
        if !path.exists() {
            debug!(path = %path.display(), "load: no stored session");
            return Ok(None);
        }

        let content = fs::read_to_string(&path).context("Failed to read session file")?;
        let session: Self = serde_json::from_str(&content).context("Failed to parse session file")?;
        debug!(username = %session.user.username, "load: session restored");
        Ok(Some(session))
    }

    /// Persist the session after a successful login or registration
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;
        let path = Self::path(data_dir);
        let content = serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        fs::write(&path, content).context("Failed to write session file")?;
        info!(username = %self.user.username, path = %path.display(), "save: session stored");
        Ok(())
    }

    /// Forget the stored session (logout). No-op when none exists.
    pub fn clear(data_dir: &Path) -> Result<()> {
        let path = Self::path(data_dir);
        if path.exists() {
            fs::remove_file(&path).context("Failed to remove session file")?;
            info!(path = %path.display(), "clear: session removed");
        }
        Ok(())
    }
}
