// crates/contact-form-core/src/runtime/mod.rs
// ============================================================================
// Module: Contact Form Runtime
// Description: Authoritative submission service and store implementations.
// Purpose: Re-validate untrusted payloads and hand accepted messages to storage.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime pieces used by the server: [`ContactService`] and the store
//! wrappers it persists through.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod service;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use service::ContactService;
pub use service::store_failure;
pub use service::unix_millis;
pub use store::InMemoryMessageStore;
pub use store::SharedMessageStore;
