// crates/contact-form-core/src/core/form.rs
// ============================================================================
// Module: Form State Model
// Description: Current field values, per-field validity, and change fan-out.
// Purpose: Hold the live form state for one page session.
// Dependencies: serde, crate::core::{field, validation}
// ============================================================================

//! ## Overview
//! [`FormState`] owns the three field values and their validation outcomes.
//! Every [`FormState::update`] revalidates the touched field through the
//! shared validators, recomputes overall validity, and synchronously
//! notifies subscribers before returning. It knows nothing about networks or
//! rendering.
//!
//! [`ContactPayload`] is the serialized form: the value snapshot that crosses
//! the network boundary.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::field::FieldId;
use crate::core::field::FieldValue;
use crate::core::validation::ValidationOutcome;
use crate::core::validation::validate;

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Serialized contact form values.
///
/// Missing members deserialize as empty so that omissions surface as field
/// rejections rather than decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    /// Message body as entered.
    #[serde(default)]
    pub message: String,
    /// Email address as entered.
    #[serde(default)]
    pub email: String,
    /// Terms acceptance.
    #[serde(default)]
    pub terms: bool,
}

impl ContactPayload {
    /// Builds a payload from raw values.
    #[must_use]
    pub fn new(message: impl Into<String>, email: impl Into<String>, terms: bool) -> Self {
        Self {
            message: message.into(),
            email: email.into(),
            terms,
        }
    }

    /// Returns a copy with surrounding whitespace removed from text fields.
    ///
    /// Validation ignores that whitespace, so trimming never changes the
    /// verdict; it only bounds the encoded size of a valid payload.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            message: self.message.trim().to_string(),
            email: self.email.trim().to_string(),
            terms: self.terms,
        }
    }

    /// Returns the value of `field`.
    #[must_use]
    pub fn value(&self, field: FieldId) -> FieldValue {
        match field {
            FieldId::Message => FieldValue::text(self.message.as_str()),
            FieldId::Email => FieldValue::text(self.email.as_str()),
            FieldId::Terms => FieldValue::flag(self.terms),
        }
    }

    /// Validates `field` against the shared constraints.
    #[must_use]
    pub fn outcome(&self, field: FieldId) -> ValidationOutcome {
        validate(field, &self.value(field))
    }

    /// Returns true when every field is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        FieldId::ALL.into_iter().all(|field| self.outcome(field).is_valid())
    }
}

// ============================================================================
// SECTION: Change Notifications
// ============================================================================

/// State change broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormChange {
    /// A field value was replaced and revalidated.
    Updated {
        /// Field that changed.
        field: FieldId,
        /// New validation outcome for that field.
        outcome: ValidationOutcome,
        /// Overall validity after the change.
        is_valid: bool,
    },
    /// All fields were restored to their initial values.
    Reset,
}

/// Handle returned by [`FormState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber callback invoked synchronously on every change.
pub type FormListener = Box<dyn FnMut(&FormChange) + Send>;

// ============================================================================
// SECTION: Form State
// ============================================================================

/// Live form values and validity for one page session.
pub struct FormState {
    /// Current values.
    values: ContactPayload,
    /// Latest outcome per field.
    outcomes: BTreeMap<FieldId, ValidationOutcome>,
    /// Registered subscribers in registration order.
    listeners: Vec<(SubscriptionId, FormListener)>,
    /// Next subscription identifier.
    next_subscription: u64,
}

impl FormState {
    /// Creates an empty form: empty message and email, terms unchecked.
    #[must_use]
    pub fn new() -> Self {
        let values = ContactPayload::default();
        let outcomes = initial_outcomes(&values);
        Self {
            values,
            outcomes,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the current value of `field`.
    #[must_use]
    pub fn value(&self, field: FieldId) -> FieldValue {
        self.values.value(field)
    }

    /// Returns the latest validation outcome for `field`.
    #[must_use]
    pub fn outcome(&self, field: FieldId) -> ValidationOutcome {
        self.outcomes.get(&field).copied().unwrap_or_else(|| self.values.outcome(field))
    }

    /// Returns true when every field is currently valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        FieldId::ALL.into_iter().all(|field| self.outcome(field).is_valid())
    }

    /// Replaces the value of `field`, revalidates it, and notifies subscribers.
    pub fn update(&mut self, field: FieldId, value: FieldValue) -> FormChange {
        match field {
            FieldId::Message => value.as_text().clone_into(&mut self.values.message),
            FieldId::Email => value.as_text().clone_into(&mut self.values.email),
            FieldId::Terms => self.values.terms = value.is_checked(),
        }
        let outcome = self.values.outcome(field);
        self.outcomes.insert(field, outcome);
        let change = FormChange::Updated {
            field,
            outcome,
            is_valid: self.is_valid(),
        };
        self.notify(&change);
        change
    }

    /// Restores the initial empty state and notifies subscribers.
    pub fn reset(&mut self) -> FormChange {
        self.values = ContactPayload::default();
        self.outcomes = initial_outcomes(&self.values);
        let change = FormChange::Reset;
        self.notify(&change);
        change
    }

    /// Returns the current values for submission, with text fields trimmed.
    #[must_use]
    pub fn snapshot(&self) -> ContactPayload {
        self.values.trimmed()
    }

    /// Registers a subscriber for state changes.
    pub fn subscribe(&mut self, listener: FormListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.saturating_add(1);
        self.listeners.push((id, listener));
        id
    }

    /// Removes a subscriber. Returns false when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Invokes every subscriber with `change`.
    fn notify(&mut self, change: &FormChange) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values)
            .field("outcomes", &self.outcomes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Computes the outcome of every field for `values`.
fn initial_outcomes(values: &ContactPayload) -> BTreeMap<FieldId, ValidationOutcome> {
    FieldId::ALL.into_iter().map(|field| (field, values.outcome(field))).collect()
}
