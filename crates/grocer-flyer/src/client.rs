//! HTTP client for the flyer search backend.

use std::time::Duration;

use grocer_core::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::FlyerError;
use crate::retry::retry_with_backoff;
use crate::types::SearchResponse;

const DEFAULT_USER_AGENT: &str = "grocer/0.1 (price-finder)";

/// Client for the flyer item search endpoint.
///
/// Use [`FlyerClient::from_config`] in production or
/// [`FlyerClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct FlyerClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FlyerClient {
    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FlyerError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FlyerError::InvalidUrl`] if the backend URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, FlyerError> {
        Ok(Self::build(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Creates a client with a custom base URL and no retries.
    ///
    /// # Errors
    ///
    /// Returns [`FlyerError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`FlyerError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, FlyerError> {
        Self::build(base_url, timeout_secs, DEFAULT_USER_AGENT)
    }

    fn build(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FlyerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| FlyerError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Retries transient failures up to `max_retries` times.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Searches the catalog and returns the decoded body as raw JSON.
    ///
    /// # Errors
    ///
    /// - [`FlyerError::Http`] on network failure or non-2xx status, after
    ///   retries are exhausted.
    /// - [`FlyerError::Deserialize`] if the body is not JSON.
    pub async fn search_raw(&self, query: &str, postal_code: &str) -> Result<Value, FlyerError> {
        let url = self.build_url(query, postal_code);
        tracing::debug!(%url, "searching flyers");
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_json(&url)
        })
        .await
    }

    /// Searches the catalog and decodes the typed response.
    ///
    /// # Errors
    ///
    /// Same as [`FlyerClient::search_raw`], plus [`FlyerError::Deserialize`]
    /// if the body does not have the [`SearchResponse`] shape.
    pub async fn search(
        &self,
        query: &str,
        postal_code: &str,
    ) -> Result<SearchResponse, FlyerError> {
        let body = self.search_raw(query, postal_code).await?;
        decode_response(query, body)
    }

    pub(crate) fn build_url(&self, query: &str, postal_code: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("postal_code", postal_code);
        url
    }

    async fn request_json(&self, url: &Url) -> Result<Value, FlyerError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FlyerError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Decodes a raw search body into [`SearchResponse`].
pub(crate) fn decode_response(query: &str, body: Value) -> Result<SearchResponse, FlyerError> {
    serde_json::from_value(body).map_err(|e| FlyerError::Deserialize {
        context: format!("search(q={query})"),
        source: e,
    })
}
