//! API client for the WSDC points registry lookup endpoint.
//!
//! This module provides the `ApiClient` struct for fetching one dancer's
//! placement history at a time. Requests are issued sequentially by the
//! scanner; the client itself holds no per-request state.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::scan::RecordSource;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Public lookup endpoint; takes the WSDC id as form field `q`
pub const LOOKUP_URL: &str = "https://points.worldsdc.com/lookup/find";

/// HTTP request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the points registry.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    lookup_url: String,
}

impl ApiClient {
    /// Create a client for the public registry with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_options(LOOKUP_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client for a specific lookup URL
    pub fn with_options(lookup_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            lookup_url: lookup_url.into(),
        })
    }

    pub fn lookup_url(&self) -> &str {
        &self.lookup_url
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the raw lookup payload for one WSDC id
    pub async fn fetch_raw(&self, wsdc_id: u32) -> Result<Value> {
        let response = self
            .client
            .post(&self.lookup_url)
            .form(&[("q", wsdc_id.to_string())])
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send lookup request for {}", wsdc_id))?;

        let response = Self::check_response(response).await?;

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read lookup response for {}", wsdc_id))?;
        debug!(wsdc_id, bytes = text.len(), "Lookup response received");

        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .with_context(|| format!("Failed to parse lookup response for {}", wsdc_id))
    }
}

impl RecordSource for ApiClient {
    async fn fetch(&self, wsdc_id: u32) -> Result<Value> {
        self.fetch_raw(wsdc_id).await
    }
}
