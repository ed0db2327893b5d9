// crates/contact-form-core/src/lib.rs
// ============================================================================
// Module: Contact Form Core Library
// Description: Public API surface for the contact form core.
// Purpose: Expose field validators, form state, and the submission service.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Contact form core holds everything both execution contexts share: the
//! static field constraints, the pure field validators, the form state
//! model, the rendering-neutral view model, and the authoritative
//! [`ContactService`]. The client engine and the server adapters depend on
//! this crate so that both validate with the very same rules.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::AcceptedMessage;
pub use interfaces::MessageId;
pub use interfaces::MessageStore;
pub use interfaces::StoreError;
pub use interfaces::StoredMessage;
pub use runtime::ContactService;
pub use runtime::InMemoryMessageStore;
pub use runtime::SharedMessageStore;
pub use runtime::store_failure;
pub use runtime::unix_millis;
