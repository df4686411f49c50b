// system-tests/src/connection.rs
// ============================================================================
// Module: Connection
// Description: Builds the Jira, ConDec, and WebDriver clients from config.
// Purpose: Give fixtures, binaries, and suites one way to reach Jira.
// Dependencies: condec-client, condec-core
// ============================================================================

//! ## Overview
//! A [`Connection`] holds the clients for one Jira instance. All of them
//! record into the same [`Transcript`], so a test can dump every exchange it
//! caused as one artifact.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use condec_client::ClientError;
use condec_client::ConDecClient;
use condec_client::Credentials;
use condec_client::FirefoxOptions;
use condec_client::HttpTransport;
use condec_client::JiraClient;
use condec_client::Transcript;
use condec_client::TransportSettings;
use condec_client::WebDriverClient;
use condec_core::ProjectKey;

use crate::config::HarnessConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Request timeout when no override is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SECTION: Connection
// ============================================================================

/// Clients for the Jira instance under test.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Jira REST client.
    jira: JiraClient,
    /// ConDec plugin client.
    condec: ConDecClient,
    /// Shared exchange log.
    transcript: Transcript,
    /// Configuration the clients were built from.
    config: HarnessConfig,
    /// Per-request timeout.
    timeout: Duration,
}

impl Connection {
    /// Builds authenticated clients for the configured Jira instance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the Jira URL is invalid or the
    /// HTTP client cannot be built.
    pub fn open(config: &HarnessConfig, timeout: Duration) -> Result<Self, ClientError> {
        let jira_url = config.jira_url().map_err(|err| ClientError::Config(err.to_string()))?;
        let settings = TransportSettings::new(jira_url.as_str())
            .with_credentials(Credentials::new(
                config.local_jira_username.clone(),
                config.local_jira_password.clone(),
            ))
            .with_timeout(timeout)
            .accept_invalid_certs(!config.strict_ssl);
        let transcript = Transcript::new();
        let transport = HttpTransport::with_transcript(settings, transcript.clone())?;
        tracing::debug!(url = %jira_url, project = %config.project_key, "opened jira connection");
        Ok(Self {
            jira: JiraClient::new(transport.clone(), config.local_jira_username.clone()),
            condec: ConDecClient::new(transport, config.project_key.clone()),
            transcript,
            config: config.clone(),
            timeout,
        })
    }

    /// Returns the Jira client.
    #[must_use]
    pub const fn jira(&self) -> &JiraClient {
        &self.jira
    }

    /// Returns the ConDec client.
    #[must_use]
    pub const fn condec(&self) -> &ConDecClient {
        &self.condec
    }

    /// Returns the shared transcript.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Returns the project under test.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.config.project_key
    }

    /// Returns the configured issue type for plain tasks.
    #[must_use]
    pub fn default_issue_type(&self) -> &str {
        &self.config.default_issue_type
    }

    /// Returns the browse URL of an issue, e.g. `.../jira/browse/CONDEC-1`.
    #[must_use]
    pub fn browse_url(&self, issue_key: &str) -> String {
        let base = self.jira.transport().base_url().as_str().trim_end_matches('/');
        format!("{base}/browse/{issue_key}")
    }

    /// Builds a WebDriver client recording into the shared transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the WebDriver URL is invalid.
    pub fn web_driver(&self) -> Result<WebDriverClient, ClientError> {
        let settings = TransportSettings::new(self.config.web_driver_url.clone())
            .with_timeout(self.timeout.max(DEFAULT_REQUEST_TIMEOUT));
        let transport = HttpTransport::with_transcript(settings, self.transcript.clone())?;
        Ok(WebDriverClient::new(transport))
    }

    /// Returns Firefox options using the configured profile.
    #[must_use]
    pub fn firefox_options(&self, headless: bool) -> FirefoxOptions {
        FirefoxOptions {
            profile_path: self.config.firefox_profile_path.clone(),
            headless,
        }
    }
}
