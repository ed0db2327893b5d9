// crates/contact-form-client/src/lib.rs
// ============================================================================
// Module: Contact Form Client Library
// Description: Scripted-path engine, controller, and transport.
// Purpose: Drive live validation and asynchronous submission in the client.
// Dependencies: contact-form-core, async-trait, reqwest
// ============================================================================

//! ## Overview
//! The scripted path of the contact form. [`ClientValidationEngine`] reacts
//! to field events and decides which hints are visible.
//! [`SubmissionController`] owns the in-flight latch, sends the payload
//! through a [`SubmissionTransport`], and applies the authoritative result.
//! Both use the shared validators from `contact-form-core`, so what the
//! client gates is exactly what the server accepts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod controller;
pub mod engine;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use controller::ControllerError;
pub use controller::SubmissionController;
pub use controller::SubmissionTicket;
pub use engine::ClientValidationEngine;
pub use engine::FieldEvent;
pub use transport::CONTACT_ENDPOINT_PATH;
pub use transport::HttpSubmissionTransport;
pub use transport::SubmissionTransport;
pub use transport::TransportError;
