// crates/contact-form-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contact Form Interfaces
// Description: Backend-agnostic persistence interface for accepted messages.
// Purpose: Keep the submission service independent of storage technology.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Accepted messages are handed to a [`MessageStore`]. The core ships an
//! in-memory implementation; durable storage lives in its own crate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Records
// ============================================================================

/// Message that passed authoritative validation, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedMessage {
    /// Trimmed sender email.
    pub email: String,
    /// Trimmed message body.
    pub message: String,
    /// Receive time in milliseconds since the Unix epoch.
    pub received_at_ms: i64,
}

/// Identifier assigned by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Persisted message with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Store-assigned identifier.
    pub id: MessageId,
    /// Persisted content.
    #[serde(flatten)]
    pub message: AcceptedMessage,
}

// ============================================================================
// SECTION: Message Store
// ============================================================================

/// Message store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("message store io error: {0}")]
    Io(String),
    /// Store data is invalid.
    #[error("message store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("message store error: {0}")]
    Store(String),
}

/// Persistence for accepted messages.
pub trait MessageStore {
    /// Persists an accepted message.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the message cannot be persisted.
    fn insert(&self, message: &AcceptedMessage) -> Result<MessageId, StoreError>;

    /// Returns up to `limit` messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when messages cannot be read.
    fn recent(&self, limit: usize) -> Result<Vec<StoredMessage>, StoreError>;
}
