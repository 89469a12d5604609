//! Schedule service client
//!
//! CRUD against `/schedules`. Reads (list, get) retry transient failures
//! with exponential backoff since they are idempotent; writes go out once
//! and report the service's `{ok, message}` verdict.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{Envelope, SchedulePayload, ScheduleRecord};
use super::{is_retryable_status, ApiError, INITIAL_BACKOFF_MS};
use crate::config::ApiConfig;

/// Schedule service client
pub struct ScheduleClient {
    base_url: String,
    token: String,
    http: Client,
    max_retries: u32,
}

impl ScheduleClient {
    /// Create a new client from configuration and the stored bearer token
    pub fn from_config(config: &ApiConfig, token: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            token: token.into(),
            http,
            max_retries: config.max_retries,
        })
    }

    /// Fetch the user's schedules, optionally filtered by completion flag
    pub async fn list(&self, is_finished: Option<bool>) -> Result<Vec<ScheduleRecord>, ApiError> {
        debug!(?is_finished, "list: called");
        let mut request = self.http.get(format!("{}/schedules", self.base_url));
        if let Some(finished) = is_finished {
            request = request.query(&[("isFinished", finished)]);
        }
        self.send_with_retry(request).await
    }

    /// Fetch one schedule by id
    pub async fn get(&self, id: i64) -> Result<ScheduleRecord, ApiError> {
        debug!(id, "get: called");
        let request = self.http.get(format!("{}/schedules/{}", self.base_url, id));
        self.send_with_retry(request).await
    }

    /// Create a schedule
    pub async fn create(&self, payload: &SchedulePayload) -> Result<(), ApiError> {
        debug!(schedule_name = %payload.schedule_name, "create: called");
        let response = self
            .http
            .post(format!("{}/schedules/", self.base_url))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;
        self.check_envelope(response).await
    }

    /// Replace a schedule wholesale
    pub async fn update(&self, id: i64, payload: &SchedulePayload) -> Result<(), ApiError> {
        debug!(id, schedule_name = %payload.schedule_name, "update: called");
        let response = self
            .http
            .put(format!("{}/schedules/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;
        self.check_envelope(response).await
    }

    /// Delete a schedule
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!(id, "delete: called");
        let response = self
            .http
            .delete(format!("{}/schedules/{}", self.base_url, id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        self.check_envelope(response).await
    }

    /// Send an idempotent request, retrying transient failures
    async fn send_with_retry<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            let req = request
                .try_clone()
                .ok_or_else(|| ApiError::InvalidResponse("request not cloneable".to_string()))?
                .bearer_auth(&self.token);

            let result = req.send().await;
            let status = match &result {
                Ok(response) => response.status().as_u16(),
                Err(_) => 0,
            };

            let retryable = match &result {
                Ok(_) => is_retryable_status(status),
                Err(e) => e.is_timeout() || e.is_connect(),
            };

            if retryable && attempt < self.max_retries {
                attempt += 1;
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt - 1);
                warn!(attempt, status, backoff_ms = backoff, "send_with_retry: transient failure, retrying");
                tokio::time::sleep(Duration::from_millis(backoff)).await;
                continue;
            }

            let response = result?;
            if !response.status().is_success() {
                return Err(ApiError::Status {
                    status: response.status().as_u16(),
                });
            }

            let text = response.text().await?;
            return serde_json::from_str(&text)
                .map_err(|e| ApiError::InvalidResponse(format!("schedule response: {}", e)));
        }
    }

    /// Read a mutating endpoint's `{ok, message}` verdict
    async fn check_envelope(&self, response: Response) -> Result<(), ApiError> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("envelope (status {}): {}", status, e)))?;

        if envelope.ok {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: envelope.message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_verdicts() {
        let ok: Envelope = serde_json::from_str(r#"{"ok":true,"message":"create success"}"#).unwrap();
        assert!(ok.ok);

        let rejected: Envelope = serde_json::from_str(r#"{"ok":false,"message":"there is some thing wrong"}"#).unwrap();
        assert!(!rejected.ok);
        assert_eq!(rejected.message, "there is some thing wrong");
    }
}
