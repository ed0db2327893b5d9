// crates/contact-form-cli/src/lib.rs
// ============================================================================
// Module: Contact Form CLI Library
// Description: Shared helpers for the contact form command-line interface.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! The CLI binary routes every user-facing string through [`i18n`].

pub mod i18n;
