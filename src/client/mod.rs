//! Metadata API client.
//!
//! Talks to the remote movie metadata API (OMDb wire shape) over HTTP GET.
//! Two query shapes exist: search-by-title and fetch-by-identifier. The
//! remote signals "no match" solely through a non-"True" `Response` field;
//! it carries no structured error code.

use crate::error::ApiError;
use crate::types::{MovieRecord, SearchHit};
use async_trait::async_trait;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Abstraction over the remote metadata API.
///
/// The command layer and session machine depend on this trait rather than on
/// a concrete HTTP client so resolution and vault flows can be exercised
/// without a network.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search records by free-text title.
    ///
    /// A remote "no results" response yields an empty vec, not an error;
    /// callers need to distinguish "no such movie" from "API unreachable".
    async fn search(&self, title: &str) -> Result<Vec<SearchHit>, ApiError>;

    /// Fetch the full record for one identifier.
    async fn details(&self, identifier: &str) -> Result<MovieRecord, ApiError>;
}

/// Bounded retry policy for transport failures.
///
/// Only `ApiError::Transport` is retried; `NotFound` and friends are final
/// answers from the remote and retrying them would just burn quota.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first (0 disables retrying).
    pub retries: u32,
    /// Base backoff, doubled per attempt.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Run `op` up to `policy.retries + 1` times, backing off between transport
/// failures. The attempt number is passed through for logging.
pub(crate) async fn with_retry<T, F, Fut>(policy: RetryPolicy, op: F) -> Result<T, ApiError>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0u32;
    loop {
        match op(attempt).await {
            Err(ApiError::Transport(reason)) if attempt < policy.retries => {
                let delay = policy.backoff * 2u32.saturating_pow(attempt);
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    "transport failure, retrying: {}",
                    reason
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,

    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    #[serde(rename = "Response")]
    response: String,

    #[serde(rename = "Error")]
    error: Option<String>,

    #[serde(flatten)]
    record: MovieRecord,
}

/// HTTP client for the OMDb-shaped metadata API.
///
/// One outbound call per invocation, a bounded request timeout, and a
/// bounded retry for transport errors. No caching, no rate limiting.
pub struct OmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl OmdbClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            retry,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!(
                "Metadata API returned HTTP {}",
                status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to parse API response: {}", e)))
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn search(&self, title: &str) -> Result<Vec<SearchHit>, ApiError> {
        let envelope: SearchEnvelope = with_retry(self.retry, |attempt| async move {
            tracing::debug!(title, attempt, "search request");
            self.get_json(&[("s", title)]).await
        })
        .await?;

        if envelope.response != "True" {
            // "Movie not found!" from the remote: an expected empty result.
            return Ok(Vec::new());
        }
        Ok(envelope.search)
    }

    async fn details(&self, identifier: &str) -> Result<MovieRecord, ApiError> {
        let envelope: DetailsEnvelope = with_retry(self.retry, |attempt| async move {
            tracing::debug!(identifier, attempt, "details request");
            self.get_json(&[("i", identifier)]).await
        })
        .await?;

        if envelope.response != "True" {
            return Err(ApiError::NotFound(
                envelope.error.unwrap_or_else(|| identifier.to_string()),
            ));
        }
        Ok(envelope.record)
    }
}
