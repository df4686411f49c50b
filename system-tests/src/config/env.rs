// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed overrides for ConDec system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 or empty values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Path of the JSON config file.
    ConfigPath,
    /// Optional run root override for artifacts.
    RunRoot,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional project key override.
    ProjectKey,
    /// Optional WebDriver server URL override.
    WebDriverUrl,
    /// Run Firefox headless (`true`/`false` or `1`/`0`).
    Headless,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "CONDEC_SYSTEM_TEST_CONFIG",
            Self::RunRoot => "CONDEC_SYSTEM_TEST_RUN_ROOT",
            Self::TimeoutSeconds => "CONDEC_SYSTEM_TEST_TIMEOUT_SEC",
            Self::ProjectKey => "CONDEC_SYSTEM_TEST_PROJECT_KEY",
            Self::WebDriverUrl => "CONDEC_SYSTEM_TEST_WEBDRIVER_URL",
            Self::Headless => "CONDEC_SYSTEM_TEST_HEADLESS",
        }
    }

    /// Every key, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::ConfigPath,
        Self::RunRoot,
        Self::TimeoutSeconds,
        Self::ProjectKey,
        Self::WebDriverUrl,
        Self::Headless,
    ];
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test overrides derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional config file path.
    pub config_path: Option<PathBuf>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Optional project key override; validated by the file config.
    pub project_key: Option<String>,
    /// Optional WebDriver URL override.
    pub web_driver_url: Option<String>,
    /// Run Firefox headless.
    pub headless: bool,
}

impl SystemTestConfig {
    /// Loads overrides from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or boolean value).
    pub fn load() -> Result<Self, String> {
        let config_path =
            read_env_nonempty(SystemTestEnv::ConfigPath.as_str())?.map(PathBuf::from);
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let project_key = read_env_nonempty(SystemTestEnv::ProjectKey.as_str())?
            .map(|value| value.trim().to_string());
        let web_driver_url = read_env_nonempty(SystemTestEnv::WebDriverUrl.as_str())?
            .map(|value| value.trim().to_string());
        let headless = parse_bool_env(
            SystemTestEnv::Headless.as_str(),
            read_env_nonempty(SystemTestEnv::Headless.as_str())?,
        )?;
        Ok(Self {
            config_path,
            run_root,
            timeout,
            project_key,
            web_driver_url,
            headless,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable; unset means `false`.
///
/// # Errors
///
/// Returns an error when the value is not a recognized boolean literal.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, String> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(format!("{name} must be 1, 0, true, or false"))
}
