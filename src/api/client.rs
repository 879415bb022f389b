//! HTTP client for the remote task/security API.
//!
//! # Responsibilities
//! - Issue GET requests against the configured base URL
//! - Enforce the per-request deadline
//! - Fold every outcome into an [`Envelope`]

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use url::Url;

use crate::api::envelope::Envelope;
use crate::config::ApiConfig;
use crate::observability::metrics;

/// Anything that can GET a JSON document by path.
///
/// Implementations must never fail: errors are reported inside the envelope.
pub trait Fetch: Send + Sync {
    fn get_json(&self, path: &str) -> impl Future<Output = Envelope> + Send;
}

/// Errors raised while constructing an [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// reqwest-backed [`Fetch`] implementation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a client for the API described by `config`.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `/health`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Fetch for ApiClient {
    async fn get_json(&self, path: &str) -> Envelope {
        let url = self.endpoint(path);
        let start = Instant::now();

        let envelope = match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes().await {
                    Ok(body) => Envelope::from_response(status, &body),
                    Err(e) => {
                        tracing::warn!(endpoint = %path, status, error = %e, "Failed to read response body");
                        Envelope::from_response(status, &[])
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %path,
                    url = %url,
                    timed_out = e.is_timeout(),
                    timeout_secs = self.timeout.as_secs(),
                    error = %e,
                    "API request failed"
                );
                Envelope::unreachable(e)
            }
        };

        tracing::debug!(
            endpoint = %path,
            status = envelope.status,
            ok = envelope.ok,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "API request completed"
        );
        metrics::record_fetch(path, &envelope, start);

        envelope
    }
}
