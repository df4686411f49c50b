// crates/condec-client/src/lib.rs
// ============================================================================
// Module: ConDec Client Library
// Description: HTTP clients for Jira, the ConDec plugin, and WebDriver.
// Purpose: Give the system tests typed, logged, single-attempt REST calls.
// Dependencies: crate::{error, transport, jira, condec, webdriver}
// ============================================================================

//! ## Overview
//! Three clients share one [`HttpTransport`]: [`JiraClient`] for the Jira REST
//! API, [`ConDecClient`] for the plugin, and [`WebDriverClient`] for browser
//! checks. Failures of any of them are reported as [`ClientError`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod condec;
pub mod error;
pub mod jira;
pub mod transport;
pub mod webdriver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use condec::ConDecClient;
pub use condec::CreatedLink;
pub use error::ClientError;
pub use jira::CreatedIssue;
pub use jira::JiraClient;
pub use jira::JiraComment;
pub use jira::JiraIssue;
pub use jira::JiraIssueLink;
pub use jira::JiraProject;
pub use jira::NewProject;
pub use transport::Credentials;
pub use transport::HttpTransport;
pub use transport::Transcript;
pub use transport::TranscriptEntry;
pub use transport::TransportSettings;
pub use webdriver::DEFAULT_IMPLICIT_WAIT;
pub use webdriver::ElementHandle;
pub use webdriver::FirefoxOptions;
pub use webdriver::Locator;
pub use webdriver::WebDriverClient;
pub use webdriver::WebDriverSession;
