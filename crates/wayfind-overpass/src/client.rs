//! HTTP client for the Overpass API interpreter endpoint.
//!
//! One search is one POST with a form-encoded `data=<query>` body. Failures
//! are surfaced as typed errors and never retried; the caller decides what a
//! failed search cycle means.

use std::time::Duration;

use reqwest::{Client, Url};
use wayfind_core::config::DEFAULT_OVERPASS_URL;

use crate::error::OverpassError;
use crate::types::{OverpassResponse, RawElement};

/// Client for an Overpass API interpreter.
///
/// Use [`OverpassClient::new`] for the public instance or
/// [`OverpassClient::with_endpoint`] to point at a mirror or a mock server.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client for the public `overpass-api.de` interpreter.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, OverpassError> {
        Self::with_endpoint(DEFAULT_OVERPASS_URL, timeout_secs, user_agent)
    }

    /// Creates a client for a custom interpreter URL.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OverpassError::InvalidEndpoint`] if
    /// `endpoint` is not an absolute URL.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| OverpassError::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs `query` and returns the raw elements.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] on network failure.
    /// - [`OverpassError::UnexpectedStatus`] on any non-2xx status.
    /// - [`OverpassError::Deserialize`] if the body is not an `[out:json]`
    ///   document.
    pub async fn fetch(&self, query: &str) -> Result<Vec<RawElement>, OverpassError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            query_len = query.len(),
            "overpass request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                endpoint = %self.endpoint,
                "overpass request failed"
            );
            return Err(OverpassError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        if let Some(remark) = &parsed.remark {
            tracing::warn!(%remark, "overpass returned a partial result");
        }
        tracing::debug!(elements = parsed.elements.len(), "overpass response");

        Ok(parsed.elements)
    }
}
