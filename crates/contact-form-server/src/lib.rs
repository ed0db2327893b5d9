// crates/contact-form-server/src/lib.rs
// ============================================================================
// Module: Contact Form Server
// Description: HTTP adapters over the authoritative submission service.
// Purpose: Serve the contact page and accept submissions with or without script.
// Dependencies: axum, tokio, contact-form-{config, core, store-sqlite}
// ============================================================================

//! ## Overview
//! The server exposes the contact page and the submission endpoint. Both
//! presentation paths, the scripted JSON adapter and the no-script page
//! adapter, consume the same [`contact_form_core::SubmissionResult`].

pub mod audit;
pub mod page;
pub mod server;

pub use audit::ContactAuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ServerStartAuditEvent;
pub use audit::StderrAuditSink;
pub use audit::SubmissionAuditEvent;
pub use audit::SubmissionChannel;
pub use page::escape_html;
pub use page::render_page;
pub use server::ContactServer;
pub use server::ServerError;
pub use server::build_router;
