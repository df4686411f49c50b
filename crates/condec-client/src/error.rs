// crates/condec-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error type shared by the Jira, ConDec, and WebDriver clients.
// Purpose: Surface HTTP status and plugin messages in one typed error.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every client call returns [`ClientError`] on failure. A non-2xx response
//! becomes [`ClientError::Status`] carrying the status code, the most specific
//! message found in the body, and the body itself so tests can assert on
//! plugin error texts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Errors returned by the HTTP clients.
///
/// # Invariants
/// - Variants are stable for test assertions.
/// - String payloads may include untrusted server text.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid client configuration (bad base URL, unbuildable client).
    #[error("client config error: {0}")]
    Config(String),
    /// Connection, timeout, or body transfer failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-2xx HTTP response.
    #[error("request failed with status code {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Plugin/Jira/WebDriver message, or the canonical reason phrase.
        message: String,
        /// Decoded response body, when it was JSON.
        body: Option<Value>,
    },
    /// Response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// WebDriver protocol violation, such as a session without an id.
    #[error("webdriver error: {0}")]
    WebDriver(String),
}

impl ClientError {
    /// Returns the HTTP status for [`ClientError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server-provided message for [`ClientError::Status`].
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message, ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Message Extraction
// ============================================================================

/// Picks the most specific error text from an error body.
///
/// Recognizes the ConDec `error` field, Jira `errorMessages`/`errors`, and the
/// W3C WebDriver `value.error`/`value.message` pair.
pub(crate) fn extract_message(body: &Value) -> Option<String> {
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Some(error.to_string());
    }
    if let Some(messages) = body.get("errorMessages").and_then(Value::as_array) {
        let joined: Vec<&str> = messages.iter().filter_map(Value::as_str).collect();
        if !joined.is_empty() {
            return Some(joined.join("; "));
        }
    }
    if let Some(errors) = body.get("errors").and_then(Value::as_object) {
        let joined: Vec<String> = errors
            .iter()
            .map(|(field, message)| format!("{field}: {}", message.as_str().unwrap_or_default()))
            .collect();
        if !joined.is_empty() {
            return Some(joined.join("; "));
        }
    }
    let value = body.get("value")?;
    let error = value.get("error").and_then(Value::as_str)?;
    let message = value.get("message").and_then(Value::as_str).unwrap_or_default();
    Some(if message.is_empty() { error.to_string() } else { format!("{error}: {message}") })
}
