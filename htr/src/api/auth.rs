//! Auth service client
//!
//! Registration and login against `POST /register/:method` and
//! `POST /login/:method`. Credential mismatch and duplicate registration
//! come back as `ok: false` envelopes and surface as [`ApiError::Rejected`]
//! with the service's message; the returned token is opaque and never
//! verified locally.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use super::types::{AuthResponse, AuthSession, LoginRequest, RegisterRequest};
use super::ApiError;
use crate::config::ApiConfig;

/// Which credential scheme an auth call uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Username + password
    Common,
    /// Facebook identity fields
    Fb,
}

impl AuthMethod {
    /// The URL path segment the service dispatches on
    pub fn as_path(&self) -> &'static str {
        match self {
            AuthMethod::Common => "common",
            AuthMethod::Fb => "fb",
        }
    }
}

/// Auth service client
pub struct AuthClient {
    base_url: String,
    http: Client,
}

impl AuthClient {
    /// Create a new client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }

    /// Register a new account
    pub async fn register(&self, method: AuthMethod, request: &RegisterRequest) -> Result<AuthSession, ApiError> {
        debug!(method = method.as_path(), username = %request.username, "register: called");
        let session = self
            .post_auth(&format!("{}/register/{}", self.base_url, method.as_path()), request)
            .await?;
        info!(username = %session.user.username, "register: account created");
        Ok(session)
    }

    /// Log in to an existing account
    pub async fn login(&self, method: AuthMethod, request: &LoginRequest) -> Result<AuthSession, ApiError> {
        debug!(method = method.as_path(), username = %request.username, "login: called");
        let session = self
            .post_auth(&format!("{}/login/{}", self.base_url, method.as_path()), request)
            .await?;
        info!(username = %session.user.username, "login: succeeded");
        Ok(session)
    }

    async fn post_auth<B: Serialize>(&self, url: &str, body: &B) -> Result<AuthSession, ApiError> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let parsed: AuthResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("auth response (status {}): {}", status, e)))?;

        if !parsed.ok {
            return Err(ApiError::Rejected { message: parsed.message });
        }

        Ok(AuthSession {
            user: parsed.user_data.unwrap_or_default(),
            token: parsed.token.unwrap_or_default(),
        })
    }
}
