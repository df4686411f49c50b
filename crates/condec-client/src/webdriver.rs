// crates/condec-client/src/webdriver.rs
// ============================================================================
// Module: WebDriver Client
// Description: Minimal W3C WebDriver client for geckodriver.
// Purpose: Drive a Firefox session to check what the plugin renders in Jira.
// Dependencies: reqwest, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Implements the handful of W3C WebDriver commands the UI suite needs:
//! new session, implicit wait, navigation, element lookup, text, attribute,
//! and session deletion. Every response is the W3C `{"value": ...}` envelope;
//! errors come back as non-2xx statuses and map to [`ClientError::Status`].
//!
//! A [`WebDriverSession`] must be closed with [`WebDriverSession::quit`];
//! [`WebDriverClient::open_session`] does so itself when setup fails, since
//! geckodriver serves one session at a time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::json;

use crate::error::ClientError;
use crate::transport::HttpTransport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// W3C key under which element references are returned.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Implicit wait applied when the caller does not choose one.
pub const DEFAULT_IMPLICIT_WAIT: Duration = Duration::from_secs(10);

// ============================================================================
// SECTION: Locators
// ============================================================================

/// Element lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector.
    Css(String),
    /// XPath expression.
    XPath(String),
    /// Element `id` attribute.
    Id(String),
}

impl Locator {
    /// Returns the W3C `{using, value}` pair.
    fn to_body(&self) -> Value {
        match self {
            Self::Css(selector) => json!({ "using": "css selector", "value": selector }),
            Self::XPath(expression) => json!({ "using": "xpath", "value": expression }),
            Self::Id(id) => json!({ "using": "css selector", "value": format!("[id=\"{id}\"]") }),
        }
    }
}

// ============================================================================
// SECTION: Capabilities
// ============================================================================

/// Firefox launch options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirefoxOptions {
    /// Profile directory holding a logged-in Jira session.
    pub profile_path: Option<String>,
    /// Run without a visible window.
    pub headless: bool,
}

impl FirefoxOptions {
    /// Builds the new-session request body.
    #[must_use]
    pub fn capabilities(&self) -> Value {
        let mut args: Vec<String> = Vec::new();
        if let Some(profile) = &self.profile_path {
            args.push("-profile".to_string());
            args.push(profile.clone());
        }
        if self.headless {
            args.push("-headless".to_string());
        }
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "firefox",
                    "moz:firefoxOptions": { "args": args }
                }
            }
        })
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Entry point for opening WebDriver sessions.
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    /// Transport rooted at the WebDriver server URL.
    transport: HttpTransport,
}

impl WebDriverClient {
    /// Creates a client for the WebDriver server behind `transport`.
    #[must_use]
    pub const fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
        }
    }

    /// Opens a Firefox session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::WebDriver`] when the server answers without a
    /// session id, plus any transport or status error.
    pub async fn new_session(
        &self,
        options: &FirefoxOptions,
    ) -> Result<WebDriverSession, ClientError> {
        let body = options.capabilities();
        let value = command(&self.transport, Method::POST, "session", Some(&body)).await?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| ClientError::WebDriver("new session response has no sessionId".to_string()))?
            .to_string();
        tracing::info!(%session_id, "opened webdriver session");
        Ok(WebDriverSession {
            transport: self.transport.clone(),
            session_id,
        })
    }

    /// Opens a Firefox session and sets its implicit wait.
    ///
    /// # Errors
    ///
    /// Returns the error of [`WebDriverClient::new_session`] or of setting
    /// the wait. A session opened before the wait failed is deleted first.
    pub async fn open_session(
        &self,
        options: &FirefoxOptions,
        implicit_wait: Duration,
    ) -> Result<WebDriverSession, ClientError> {
        let session = self.new_session(options).await?;
        if let Err(err) = session.set_implicit_wait(implicit_wait).await {
            let session_id = session.session_id().to_string();
            if let Err(quit_err) = session.quit().await {
                tracing::warn!(%session_id, error = %quit_err, "failed to delete webdriver session");
            }
            return Err(err);
        }
        Ok(session)
    }
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// Reference to an element in the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Returns the WebDriver element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Open browser session.
#[derive(Debug)]
pub struct WebDriverSession {
    /// Transport rooted at the WebDriver server URL.
    transport: HttpTransport,
    /// Session id assigned by the server.
    session_id: String,
}

impl WebDriverSession {
    /// Returns the session id.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Sets how long element lookups wait for the element to appear.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the command fails.
    pub async fn set_implicit_wait(&self, wait: Duration) -> Result<(), ClientError> {
        let millis = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        let body = json!({ "implicit": millis });
        self.run(Method::POST, "timeouts", Some(&body)).await?;
        Ok(())
    }

    /// Navigates to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when navigation fails.
    pub async fn goto(&self, url: &str) -> Result<(), ClientError> {
        tracing::debug!(session_id = %self.session_id, %url, "navigating");
        let body = json!({ "url": url });
        self.run(Method::POST, "url", Some(&body)).await?;
        Ok(())
    }

    /// Finds the first element matching `locator`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] (404, `no such element`) when nothing
    /// matches within the implicit wait.
    pub async fn find_element(&self, locator: &Locator) -> Result<ElementHandle, ClientError> {
        let value = self.run(Method::POST, "element", Some(&locator.to_body())).await?;
        element_handle(&value)
    }

    /// Finds every element matching `locator`; empty when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the command fails.
    pub async fn find_elements(&self, locator: &Locator) -> Result<Vec<ElementHandle>, ClientError> {
        let value = self.run(Method::POST, "elements", Some(&locator.to_body())).await?;
        let items = value
            .as_array()
            .ok_or_else(|| ClientError::WebDriver("find elements did not return a list".to_string()))?;
        items.iter().map(element_handle).collect()
    }

    /// Returns the rendered text of an element.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the element is stale or the command fails.
    pub async fn text(&self, element: &ElementHandle) -> Result<String, ClientError> {
        let value = self.run(Method::GET, &format!("element/{}/text", element.id()), None).await?;
        decode(value)
    }

    /// Returns an attribute of an element; `None` when it is not set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the element is stale or the command fails.
    pub async fn attribute(
        &self,
        element: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, ClientError> {
        let path = format!("element/{}/attribute/{name}", element.id());
        let value = self.run(Method::GET, &path, None).await?;
        decode(value)
    }

    /// Closes the browser and ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the server refuses to delete the session.
    pub async fn quit(self) -> Result<(), ClientError> {
        let path = format!("session/{}", self.session_id);
        self.transport.send_empty(Method::DELETE, &path, &[]).await?;
        tracing::info!(session_id = %self.session_id, "closed webdriver session");
        Ok(())
    }

    /// Runs a session-scoped command and unwraps the `value` envelope.
    async fn run(&self, method: Method, command_path: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        let path = format!("session/{}/{command_path}", self.session_id);
        command(&self.transport, method, &path, body).await
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Sends a command and returns the contents of the `value` envelope.
async fn command(
    transport: &HttpTransport,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<Value, ClientError> {
    // geckodriver rejects POST commands without a JSON body.
    let empty = json!({});
    let body = if method == Method::POST { Some(body.unwrap_or(&empty)) } else { body };
    let response = transport.send(method, path, &[], body).await?;
    match response {
        Some(Value::Object(mut envelope)) => Ok(envelope.remove("value").unwrap_or(Value::Null)),
        Some(other) => Err(ClientError::WebDriver(format!("response is not a value envelope: {other}"))),
        None => Ok(Value::Null),
    }
}

/// Extracts an element reference from a lookup result.
fn element_handle(value: &Value) -> Result<ElementHandle, ClientError> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| ElementHandle(id.to_string()))
        .ok_or_else(|| ClientError::WebDriver(format!("missing element reference in {value}")))
}

/// Decodes a command result.
fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|err| ClientError::Decode(format!("unexpected webdriver value: {err}")))
}
