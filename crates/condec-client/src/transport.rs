// crates/condec-client/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: Authenticated JSON-over-HTTP transport with transcripts.
// Purpose: Give every client one request path, one error mapping, one log.
// Dependencies: reqwest, serde, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! [`HttpTransport`] sends JSON requests relative to a base URL, applies HTTP
//! Basic auth when credentials are configured, and records each exchange in
//! a shared [`Transcript`]. Calls are single attempts: failures are returned
//! to the caller, never retried, so a broken fixture fails the test at once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ClientError;
use crate::error::extract_message;

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Settings for building a transport.
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Base URL every request path is resolved against.
    pub base_url: String,
    /// Optional Basic auth credentials.
    pub credentials: Option<Credentials>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (local Jira instances).
    pub accept_invalid_certs: bool,
}

impl TransportSettings {
    /// Creates settings with a 30 second timeout and strict TLS.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }

    /// Attaches Basic auth credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accepts self-signed certificates.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded HTTP exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based sequence number.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Full request URL including query.
    pub url: String,
    /// JSON request body.
    pub request: Option<Value>,
    /// HTTP status, absent on transport failure.
    pub status: Option<u16>,
    /// Decoded response body.
    pub response: Option<Value>,
    /// Error text when the exchange failed.
    pub error: Option<String>,
}

/// Shared, append-only log of HTTP exchanges.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    /// Recorded entries.
    entries: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the entries.
    #[must_use]
    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.entries.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Appends an exchange.
    fn record(
        &self,
        method: &Method,
        url: &Url,
        request: Option<Value>,
        status: Option<u16>,
        response: Option<Value>,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.entries.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.to_string(),
            url: url.to_string(),
            request,
            status,
            response,
            error,
        });
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// JSON transport bound to one base URL.
///
/// # Invariants
/// - `base_url` always ends with `/` so relative paths append to it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL for relative request paths.
    base_url: Url,
    /// Underlying HTTP client.
    client: Client,
    /// Optional Basic auth credentials.
    credentials: Option<Credentials>,
    /// Exchange log shared with sibling transports.
    transcript: Transcript,
}

impl HttpTransport {
    /// Builds a transport with a fresh transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn new(settings: TransportSettings) -> Result<Self, ClientError> {
        Self::with_transcript(settings, Transcript::new())
    }

    /// Builds a transport that records into an existing transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the base URL is invalid or the
    /// HTTP client cannot be built.
    pub fn with_transcript(
        settings: TransportSettings,
        transcript: Transcript,
    ) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(&settings.base_url)?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            base_url,
            client,
            credentials: settings.credentials,
            transcript,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the transcript this transport records into.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Resolves a relative path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the path cannot be joined.
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ClientError::Config(format!("invalid request path {path}: {err}")))
    }

    /// Sends a request and returns the decoded body (`None` when empty).
    ///
    /// Non-JSON success bodies are returned as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] on connection failure and
    /// [`ClientError::Status`] on a non-2xx response.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Option<Value>, ClientError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(key, value)| (*key, value)));
        }
        let request_value = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|err| ClientError::Decode(format!("request serialization failed: {err}")))?;

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }
        if let Some(value) = &request_value {
            request = request.json(value);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                let message = format!("{method} {url} failed: {err}");
                tracing::debug!(%method, %url, error = %err, "http request failed");
                self.transcript.record(&method, &url, request_value, None, None, Some(message.clone()));
                return Err(ClientError::Transport(message));
            }
        };
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::Transport(format!("failed to read response body: {err}")))?;
        let decoded = decode_body(&bytes);
        tracing::debug!(%method, %url, status = status.as_u16(), "http request completed");

        if status.is_success() {
            self.transcript.record(
                &method,
                &url,
                request_value,
                Some(status.as_u16()),
                decoded.clone(),
                None,
            );
            return Ok(decoded);
        }

        let message = decoded
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());
        self.transcript.record(
            &method,
            &url,
            request_value,
            Some(status.as_u16()),
            decoded.clone(),
            Some(message.clone()),
        );
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
            body: decoded,
        })
    }

    /// Sends a request and decodes the response body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body is missing or has the
    /// wrong shape, plus every error of [`HttpTransport::send`].
    pub async fn send_typed<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ClientError> {
        let value = self
            .send(method, path, query, body)
            .await?
            .ok_or_else(|| ClientError::Decode(format!("empty response body for {path}")))?;
        serde_json::from_value(value)
            .map_err(|err| ClientError::Decode(format!("unexpected response for {path}: {err}")))
    }

    /// Sends a request without a body.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::send`].
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<Value>, ClientError> {
        self.send::<Value>(method, path, query, None).await
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses the base URL and guarantees a trailing slash.
fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let with_slash =
        if trimmed.ends_with('/') { trimmed.to_string() } else { format!("{trimmed}/") };
    let url = Url::parse(&with_slash)
        .map_err(|err| ClientError::Config(format!("invalid base url {trimmed}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Config(format!("base url {trimmed} cannot be a base")));
    }
    Ok(url)
}

/// Decodes a response body as JSON, falling back to a JSON string.
fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes)
        .ok()
        .or_else(|| Some(Value::String(String::from_utf8_lossy(bytes).into_owned())))
}
