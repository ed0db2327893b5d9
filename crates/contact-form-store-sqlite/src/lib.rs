// crates/contact-form-store-sqlite/src/lib.rs
// ============================================================================
// Module: Contact Form SQLite Store Library
// Description: Public API surface for the SQLite message store.
// Purpose: Expose the durable MessageStore implementation and its config.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! Durable [`MessageStore`](contact_form_core::MessageStore) backed by
//! `SQLite`. Accepted messages land in the `emails` table.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SCHEMA_VERSION;
pub use store::SqliteMessageStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
