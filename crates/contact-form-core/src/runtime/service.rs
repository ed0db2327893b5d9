// crates/contact-form-core/src/runtime/service.rs
// ============================================================================
// Module: Contact Submission Service
// Description: Authoritative server-side validation and persistence.
// Purpose: Decide every submission independently of any client state.
// Dependencies: crate::{core, interfaces}, crate::runtime::store
// ============================================================================

//! ## Overview
//! [`ContactService`] is the single source of truth for acceptance. It
//! re-validates the full payload with the shared field validators, so a
//! request that bypassed the client entirely is judged by the same rules.
//! Every offending field is reported; only failures no field caused (such
//! as storage errors) become a general error.
//!
//! The service is stateless per request: each call carries its full input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::core::field::FieldId;
use crate::core::form::ContactPayload;
use crate::core::messages::MessageKey;
use crate::core::submission::SubmissionResult;
use crate::interfaces::AcceptedMessage;
use crate::interfaces::MessageStore;
use crate::interfaces::StoreError;
use crate::runtime::store::SharedMessageStore;

// ============================================================================
// SECTION: Service
// ============================================================================

/// Authoritative contact form submission service.
#[derive(Clone)]
pub struct ContactService {
    /// Destination for accepted messages.
    store: SharedMessageStore,
}

impl ContactService {
    /// Creates a service persisting into `store`.
    #[must_use]
    pub const fn new(store: SharedMessageStore) -> Self {
        Self {
            store,
        }
    }

    /// Validates `payload` without persisting.
    ///
    /// Returns [`SubmissionResult::Success`] when every field is valid and
    /// [`SubmissionResult::FieldErrors`] naming every offending field otherwise.
    #[must_use]
    pub fn check(payload: &ContactPayload) -> SubmissionResult {
        match Self::accept(payload, 0) {
            Ok(_) => SubmissionResult::Success,
            Err(result) => result,
        }
    }

    /// Validates `payload` and produces the normalized message to persist.
    ///
    /// # Errors
    ///
    /// Returns the [`SubmissionResult::FieldErrors`] to report when any field
    /// is rejected.
    pub fn accept(
        payload: &ContactPayload,
        received_at_ms: i64,
    ) -> Result<AcceptedMessage, SubmissionResult> {
        let rejections: Vec<_> = FieldId::ALL
            .into_iter()
            .filter_map(|field| payload.outcome(field).rejection())
            .collect();
        if !rejections.is_empty() {
            return Err(SubmissionResult::from_rejections(rejections));
        }
        Ok(AcceptedMessage {
            email: payload.email.trim().to_string(),
            message: payload.message.trim().to_string(),
            received_at_ms,
        })
    }

    /// Validates and persists `payload`, stamping it with the current time.
    #[must_use]
    pub fn submit(&self, payload: &ContactPayload) -> SubmissionResult {
        self.submit_at(payload, unix_millis())
    }

    /// Validates and persists `payload` with an explicit receive time.
    ///
    /// A store failure becomes [`SubmissionResult::GeneralError`]; use
    /// [`ContactService::try_submit_at`] to keep the underlying error.
    #[must_use]
    pub fn submit_at(&self, payload: &ContactPayload, received_at_ms: i64) -> SubmissionResult {
        self.try_submit_at(payload, received_at_ms).unwrap_or_else(|_| store_failure())
    }

    /// Validates and persists `payload`, stamping it with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a valid message cannot be persisted.
    pub fn try_submit(&self, payload: &ContactPayload) -> Result<SubmissionResult, StoreError> {
        self.try_submit_at(payload, unix_millis())
    }

    /// Validates and persists `payload` with an explicit receive time.
    ///
    /// Field rejections are an `Ok` outcome; only persistence fails.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a valid message cannot be persisted.
    pub fn try_submit_at(
        &self,
        payload: &ContactPayload,
        received_at_ms: i64,
    ) -> Result<SubmissionResult, StoreError> {
        let accepted = match Self::accept(payload, received_at_ms) {
            Ok(accepted) => accepted,
            Err(result) => return Ok(result),
        };
        self.store.insert(&accepted)?;
        Ok(SubmissionResult::Success)
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &SharedMessageStore {
        &self.store
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the general error reported when persistence fails.
#[must_use]
pub fn store_failure() -> SubmissionResult {
    SubmissionResult::general(MessageKey::StoreFailed.text())
}

/// Returns the current time in milliseconds since the Unix epoch.
#[must_use]
pub fn unix_millis() -> i64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}
