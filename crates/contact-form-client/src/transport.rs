// crates/contact-form-client/src/transport.rs
// ============================================================================
// Module: Submission Transport
// Description: Asynchronous boundary between the controller and the server.
// Purpose: Carry the payload out and the authoritative result back.
// Dependencies: async-trait, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`SubmissionTransport`] is the only suspension point of the scripted path.
//! [`HttpSubmissionTransport`] posts the payload as JSON to the contact
//! endpoint with `Accept: application/json` and decodes the structured
//! result. Field errors and server failures arrive with non-2xx statuses but
//! still carry a result body; only an unreachable server or an unreadable
//! body is a [`TransportError`].
//!
//! Security posture: server responses are untrusted; bodies are size-limited
//! and fail closed on parse errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use contact_form_core::ContactPayload;
use contact_form_core::SubmissionResult;
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path of the submission endpoint.
pub const CONTACT_ENDPOINT_PATH: &str = "/api/contact";
/// Maximum response body size accepted by the client.
pub const MAX_RESPONSE_BYTES: usize = 64 * 1024;
/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport errors.
///
/// # Invariants
/// - None of these are attributable to a field.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Configuration error.
    #[error("transport config error: {0}")]
    Config(String),
    /// The request could not be completed.
    #[error("transport error: {0}")]
    Http(String),
    /// The response was not a submission result.
    #[error("transport protocol error: {0}")]
    Protocol(String),
    /// Response size exceeds limits.
    #[error("transport response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Actual size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Transport Trait
// ============================================================================

/// Boundary that delivers a payload to the server validation engine.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Sends `payload` and returns the authoritative result.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no result could be obtained.
    async fn send(&self, payload: &ContactPayload) -> Result<SubmissionResult, TransportError>;
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// JSON-over-HTTP submission transport.
#[derive(Debug, Clone)]
pub struct HttpSubmissionTransport {
    /// HTTP client.
    client: Client,
    /// Absolute endpoint URL.
    endpoint: Url,
}

impl HttpSubmissionTransport {
    /// Builds a transport posting to [`CONTACT_ENDPOINT_PATH`] on `base`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the endpoint cannot be derived or the
    /// HTTP client cannot be constructed.
    pub fn new(base: &Url) -> Result<Self, TransportError> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    /// Builds a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the endpoint cannot be derived or the
    /// HTTP client cannot be constructed.
    pub fn with_timeout(base: &Url, timeout: Duration) -> Result<Self, TransportError> {
        let endpoint = base
            .join(CONTACT_ENDPOINT_PATH)
            .map_err(|err| TransportError::Config(err.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::Http(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<SubmissionResult, TransportError> {
        let body = serde_json::to_vec(payload)
            .map_err(|err| TransportError::Protocol(format!("payload serialization: {err}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|err| TransportError::Http(err.to_string()))?;
        let status = response.status();
        let bytes = read_response_body_with_limit(response, MAX_RESPONSE_BYTES).await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            TransportError::Protocol(format!("http status {}: {err}", status.as_u16()))
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a hard byte limit.
async fn read_response_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| TransportError::Http(err.to_string()))?
    {
        let next_total = body.len().saturating_add(chunk.len());
        if next_total > limit {
            return Err(TransportError::ResponseTooLarge {
                actual: next_total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
