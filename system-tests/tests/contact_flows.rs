// system-tests/tests/contact_flows.rs
// ============================================================================
// Module: Contact Flow Suite
// Description: Aggregates end-to-end submission tests into one binary.
// Purpose: Keep scripted, no-script, and parity coverage centralized.
// Dependencies: suites/*, helpers
// ============================================================================

//! ## Overview
//! Aggregates contact form flow system tests into one binary.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod helpers;

#[path = "suites/channel_parity.rs"]
mod channel_parity;
#[path = "suites/no_script_flow.rs"]
mod no_script_flow;
#[path = "suites/scripted_flow.rs"]
mod scripted_flow;
