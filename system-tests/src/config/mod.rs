// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Centralized configuration for ConDec system tests.
// Purpose: Provide typed access to the Jira instance and run settings.
// Dependencies: condec-core, serde_json, url
// ============================================================================

//! ## Overview
//! Connection settings come from a JSON file ([`HarnessConfig`]); run
//! settings and a few connection overrides come from environment variables
//! ([`SystemTestConfig`]).

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod file;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
pub use env::parse_timeout_seconds;
pub use env::read_env_strict;
pub use file::ConfigError;
pub use file::DEFAULT_CONFIG_NAME;
pub use file::HarnessConfig;
