// system-tests/src/lib.rs
// ============================================================================
// Module: Contact Form System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common utilities for the contact form system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the contact form
//! system-test binaries in `system-tests/tests`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
