//! Homework API client
//!
//! One `GET` per polling cycle against the homework status endpoint. Every
//! failure (transport, body decoding, non-200 status) surfaces as
//! [`Error::GetApiAnswer`].
//!
//! The API is expected to list homeworks most-recent first; the poller only
//! ever looks at the first record.

use crate::config::Config;
use crate::error::{ApiAnswerError, Error, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

/// Source of homework status answers
///
/// [`PracticumClient`] talks to the real API. The poller only depends on this
/// trait, so tests can script answers without a network.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch the homeworks whose status changed since `timestamp`
    ///
    /// # Arguments
    ///
    /// * `timestamp` - UNIX time in seconds, sent as the `from_date` parameter
    ///
    /// # Errors
    ///
    /// Returns [`Error::GetApiAnswer`] if the request fails, the body is not
    /// JSON, or the status is not 200 OK.
    async fn get_api_answer(&self, timestamp: i64) -> Result<Value>;
}

/// HTTP client for the homework status endpoint
pub struct PracticumClient {
    http_client: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    /// Create a client from the poller configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("homework-notifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to create HTTP client: {e}"),
                key: None,
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            auth_header: format!("OAuth {}", config.credentials.practicum_token),
        })
    }

    async fn request(&self, timestamp: i64) -> std::result::Result<Value, ApiAnswerError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", timestamp)])
            .send()
            .await
            .map_err(ApiAnswerError::Request)?;

        let status = response.status();
        // The body is decoded before the status is looked at.
        let body = response.json::<Value>().await.map_err(ApiAnswerError::Decode)?;

        if status != StatusCode::OK {
            return Err(ApiAnswerError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, timestamp: i64) -> Result<Value> {
        debug!(endpoint = %self.endpoint, from_date = timestamp, "Querying homework API");

        self.request(timestamp).await.map_err(|e| {
            error!(endpoint = %self.endpoint, error = %e, "Homework API request failed");
            Error::GetApiAnswer(e)
        })
    }
}
