// crates/contact-form-core/src/runtime/store.rs
// ============================================================================
// Module: Contact Form In-Memory Store
// Description: Simple in-memory message store for tests and local demos.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryMessageStore`] keeps accepted messages in a mutex-guarded vector.
//! [`SharedMessageStore`] wraps any store behind an `Arc` so request handlers
//! can share it. Not intended for production persistence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::interfaces::AcceptedMessage;
use crate::interfaces::MessageId;
use crate::interfaces::MessageStore;
use crate::interfaces::StoreError;
use crate::interfaces::StoredMessage;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory message store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageStore {
    /// Stored messages in insertion order.
    messages: Arc<Mutex<Vec<StoredMessage>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns the number of stored messages.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let guard = self
            .messages
            .lock()
            .map_err(|_| StoreError::Store("message store mutex poisoned".to_string()))?;
        Ok(guard.len())
    }

    /// Returns true when no messages are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl MessageStore for InMemoryMessageStore {
    fn insert(&self, message: &AcceptedMessage) -> Result<MessageId, StoreError> {
        let mut guard = self
            .messages
            .lock()
            .map_err(|_| StoreError::Store("message store mutex poisoned".to_string()))?;
        let next = i64::try_from(guard.len())
            .map_err(|_| StoreError::Invalid("message count overflow".to_string()))?
            .saturating_add(1);
        let id = MessageId::new(next);
        guard.push(StoredMessage {
            id,
            message: message.clone(),
        });
        Ok(id)
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredMessage>, StoreError> {
        let guard = self
            .messages
            .lock()
            .map_err(|_| StoreError::Store("message store mutex poisoned".to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

// ============================================================================
// SECTION: Shared Store
// ============================================================================

/// Shared message store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedMessageStore {
    /// Inner store implementation.
    inner: Arc<dyn MessageStore + Send + Sync>,
}

impl SharedMessageStore {
    /// Wraps a message store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl MessageStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn MessageStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl MessageStore for SharedMessageStore {
    fn insert(&self, message: &AcceptedMessage) -> Result<MessageId, StoreError> {
        self.inner.insert(message)
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredMessage>, StoreError> {
        self.inner.recent(limit)
    }
}
