// crates/contact-form-client/src/engine.rs
// ============================================================================
// Module: Client Validation Engine
// Description: Reactive live validation over the form state model.
// Purpose: Gate the submit control and decide which hints are visible.
// Dependencies: contact-form-core
// ============================================================================

//! ## Overview
//! The engine consumes [`FieldEvent`]s in dispatch order. Each input event
//! updates the [`FormState`] synchronously before the next event is
//! considered, so [`ClientValidationEngine::submit_enabled`] always reflects
//! the latest committed input.
//!
//! Hints follow the touched rule: a text field becomes touched on blur, the
//! checkbox on any input. A hint is visible only while the field is touched,
//! invalid, has hint text, and carries no authoritative error. Any input
//! clears the authoritative feedback from the previous submission.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::time::Duration;
use std::time::Instant;

use contact_form_core::FieldError;
use contact_form_core::FieldErrors;
use contact_form_core::FieldId;
use contact_form_core::FieldValue;
use contact_form_core::FormChange;
use contact_form_core::FormState;
use contact_form_core::Hint;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Field event dispatched by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The field value changed.
    Input(FieldId, FieldValue),
    /// The field lost focus.
    Blur(FieldId),
}

impl FieldEvent {
    /// Returns the field the event targets.
    #[must_use]
    pub const fn field(&self) -> FieldId {
        match self {
            Self::Input(field, _) | Self::Blur(field) => *field,
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Live validation engine for one page session.
#[derive(Debug, Default)]
pub struct ClientValidationEngine {
    /// Form values and validity.
    state: FormState,
    /// Fields that have been touched.
    touched: BTreeSet<FieldId>,
    /// Authoritative errors from the last submission.
    errors: FieldErrors,
    /// General error from the last submission.
    general_error: Option<String>,
    /// When the success confirmation was shown.
    success_shown_at: Option<Instant>,
}

impl ClientValidationEngine {
    /// Creates an engine over an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a field event.
    ///
    /// Returns the state change for input events and `None` for blur.
    pub fn handle(&mut self, event: FieldEvent) -> Option<FormChange> {
        match event {
            FieldEvent::Input(field, value) => {
                if field == FieldId::Terms {
                    self.touched.insert(field);
                }
                self.clear_feedback();
                Some(self.state.update(field, value))
            }
            FieldEvent::Blur(field) => {
                self.touched.insert(field);
                None
            }
        }
    }

    /// Returns the form state.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the form state for subscriber registration.
    pub const fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    /// Returns true when the submit control should be enabled.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.state.is_valid()
    }

    /// Returns true when `field` has been touched.
    #[must_use]
    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched.contains(&field)
    }

    /// Returns the visible hint for `field`, if any.
    #[must_use]
    pub fn hint(&self, field: FieldId) -> Option<Hint> {
        if !self.is_touched(field) || self.errors.contains_key(&field) {
            return None;
        }
        self.state.outcome(field).hint()
    }

    /// Returns the displayed authoritative error for `field`, if any.
    #[must_use]
    pub fn error(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Returns the displayed general error, if any.
    #[must_use]
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Returns true while the success confirmation is visible.
    #[must_use]
    pub const fn success_visible(&self) -> bool {
        self.success_shown_at.is_some()
    }

    /// Displays authoritative field errors.
    pub fn show_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Displays a general error.
    pub fn show_general_error(&mut self, message: String) {
        self.general_error = Some(message);
    }

    /// Clears the form and shows the success confirmation.
    pub fn show_success(&mut self, now: Instant) {
        self.state.reset();
        self.touched.clear();
        self.errors.clear();
        self.general_error = None;
        self.success_shown_at = Some(now);
    }

    /// Hides the success confirmation once `display` has elapsed since it
    /// was shown. Returns true when it was hidden by this call.
    pub fn expire_success(&mut self, now: Instant, display: Duration) -> bool {
        match self.success_shown_at {
            Some(shown_at) if now.saturating_duration_since(shown_at) >= display => {
                self.success_shown_at = None;
                true
            }
            _ => false,
        }
    }

    /// Clears authoritative errors, the general error, and the success
    /// confirmation.
    pub fn clear_feedback(&mut self) {
        self.errors.clear();
        self.general_error = None;
        self.success_shown_at = None;
    }
}
