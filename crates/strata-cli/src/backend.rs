//! Blocking client for the external analysis backend.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use strata_assess::{analyze_url, AnalyzeRequest};

/// Message reported for any failure talking to the backend.
pub const FETCH_FAILED: &str = "Failed to fetch assessment";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub struct BackendClient {
    client: Client,
    api_url: String,
}

impl BackendClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// POST the request to `{api_url}/analyze` and return the response body verbatim.
    ///
    /// One attempt, no retry. Transport errors, non-2xx statuses and non-JSON bodies all
    /// surface as [`FETCH_FAILED`].
    pub fn analyze(&self, request: &AnalyzeRequest<'_>) -> Result<Value> {
        let url = analyze_url(&self.api_url);
        log::debug!("POST {url}");
        self.client
            .post(&url)
            .json(request)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Value>())
            .context(FETCH_FAILED)
    }
}
