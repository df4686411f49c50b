// system-tests/src/lib.rs
// ============================================================================
// Module: ConDec System Tests Library
// Description: Shared configuration, clients, and fixture for system tests.
// Purpose: Provide common utilities for the ConDec system-test binaries.
// Dependencies: condec-client, condec-core, tracing-subscriber
// ============================================================================

//! ## Overview
//! This crate hosts the configuration loader, client wiring, and the Jira
//! reset fixture used by the live suites in `system-tests/tests` and by the
//! `condec-setup` binary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod connection;
pub mod fixture;
pub mod logging;

// ============================================================================
// SECTION: Tests
// ============================================================================
