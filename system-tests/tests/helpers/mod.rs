// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for contact form system-tests.
// Purpose: Provide server harnesses, readiness polling, and page inspection.
// Dependencies: system-tests, contact-form-server
// ============================================================================

//! ## Overview
//! Shared helpers for contact form system-tests. Servers run in-process on
//! loopback ports and are exercised over real HTTP.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod harness;
pub mod page;
pub mod readiness;
pub mod requests;
