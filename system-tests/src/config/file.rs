// system-tests/src/config/file.rs
// ============================================================================
// Module: Harness Config File
// Description: JSON configuration describing the Jira instance under test.
// Purpose: Load, override, and validate connection settings once per run.
// Dependencies: condec-core, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! The harness reads `config.json` (or the file named by
//! `CONDEC_SYSTEM_TEST_CONFIG`) with the keys used by the original ConDec
//! test setup: `baseUrl`, `usePort`, `fullUrl`, `localJiraUsername`,
//! `localJiraPassword`, `projectKey`, `defaultIssueType`, and
//! `firefoxProfilePath`. Environment overrides are applied on top, then the
//! result is validated.
//!
//! # Invariants
//! - A loaded [`HarnessConfig`] always has a parseable Jira URL, a valid
//!   project key, and a non-empty user name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use condec_core::ProjectKey;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::env::SystemTestConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "config.json";

/// Largest config file accepted.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

/// Default Jira context path.
const DEFAULT_BASE_PATH: &str = "jira";

/// Default Jira issue type for plain tasks.
const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Default geckodriver address.
const DEFAULT_WEB_DRIVER_URL: &str = "http://localhost:4444";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// JSON parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Invalid environment override.
    #[error("invalid environment: {0}")]
    Env(String),
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Connection settings for the Jira instance under test.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HarnessConfig {
    /// Jira host, with or without scheme (`localhost`, `https://jira.example`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Jira port.
    #[serde(default)]
    pub use_port: Option<u16>,
    /// Jira context path.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Full Jira URL; derived from host, port, and path when absent.
    #[serde(default)]
    pub full_url: Option<String>,
    /// Jira user name, also used as issue reporter and project lead.
    pub local_jira_username: String,
    /// Jira password.
    pub local_jira_password: String,
    /// Project the tests run in.
    pub project_key: ProjectKey,
    /// Issue type for plain Jira tasks.
    #[serde(default = "default_issue_type")]
    pub default_issue_type: String,
    /// Firefox profile directory with a logged-in Jira session.
    #[serde(default)]
    pub firefox_profile_path: Option<String>,
    /// WebDriver server URL.
    #[serde(default = "default_web_driver_url")]
    pub web_driver_url: String,
    /// Verify TLS certificates of the Jira instance.
    #[serde(default, rename = "strictSSL")]
    pub strict_ssl: bool,
}

impl HarnessConfig {
    /// Loads the config named by the environment (or `config.json`), applies
    /// environment overrides, and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the environment, the file, or the merged
    /// result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let env = SystemTestConfig::load().map_err(ConfigError::Env)?;
        let path = env.config_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));
        let mut config = Self::from_file(&path)?;
        config.apply_env(&env)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config = Self::from_json(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown keys, or an
    /// invalid project key.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        serde_json::from_slice(bytes).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] when the project key override is invalid.
    pub fn apply_env(&mut self, env: &SystemTestConfig) -> Result<(), ConfigError> {
        if let Some(project_key) = &env.project_key {
            self.project_key = ProjectKey::new(project_key.as_str())
                .map_err(|err| ConfigError::Env(err.to_string()))?;
        }
        if let Some(web_driver_url) = &env.web_driver_url {
            self.web_driver_url.clone_from(web_driver_url);
        }
        Ok(())
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a field is empty or a URL does
    /// not parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.local_jira_username.trim().is_empty() {
            return Err(ConfigError::Invalid("localJiraUsername must be non-empty".to_string()));
        }
        if self.default_issue_type.trim().is_empty() {
            return Err(ConfigError::Invalid("defaultIssueType must be non-empty".to_string()));
        }
        self.jira_url()?;
        Url::parse(&self.web_driver_url)
            .map_err(|err| ConfigError::Invalid(format!("webDriverUrl is not a url: {err}")))?;
        Ok(())
    }

    /// Returns the Jira base URL, e.g. `http://localhost:8080/jira`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when neither `fullUrl` nor `baseUrl`
    /// is set or the result does not parse.
    pub fn jira_url(&self) -> Result<Url, ConfigError> {
        let raw = match (&self.full_url, &self.base_url) {
            (Some(full), _) => full.trim().to_string(),
            (None, Some(host)) => derive_url(host, self.use_port, &self.base_path),
            (None, None) => {
                return Err(ConfigError::Invalid("either fullUrl or baseUrl is required".to_string()));
            }
        };
        Url::parse(&raw).map_err(|err| ConfigError::Invalid(format!("jira url {raw}: {err}")))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds `scheme://host[:port]/path` from the split settings.
fn derive_url(host: &str, port: Option<u16>, base_path: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let with_scheme =
        if host.contains("://") { host.to_string() } else { format!("http://{host}") };
    let with_port = port.map_or_else(|| with_scheme.clone(), |port| format!("{with_scheme}:{port}"));
    let path = base_path.trim_matches('/');
    if path.is_empty() { with_port } else { format!("{with_port}/{path}") }
}

/// Serde default for `basePath`.
fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

/// Serde default for `defaultIssueType`.
fn default_issue_type() -> String {
    DEFAULT_ISSUE_TYPE.to_string()
}

/// Serde default for `webDriverUrl`.
fn default_web_driver_url() -> String {
    DEFAULT_WEB_DRIVER_URL.to_string()
}
