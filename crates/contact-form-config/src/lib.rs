// crates/contact-form-config/src/lib.rs
// ============================================================================
// Module: Contact Form Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for contact-form.toml semantics.
// Dependencies: contact-form-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `contact-form-config` defines the configuration model for the contact form
//! server. Loading is strict and fail-closed: oversized files, unknown store
//! types, and inconsistent sections are rejected before anything starts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
