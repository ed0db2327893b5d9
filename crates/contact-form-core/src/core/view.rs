// crates/contact-form-core/src/core/view.rs
// ============================================================================
// Module: Form View Model
// Description: Rendering-neutral description of what the form shows.
// Purpose: Let the scripted and no-script renderers draw from one model.
// Dependencies: crate::core::{field, form, messages, submission}
// ============================================================================

//! ## Overview
//! A [`FormView`] says, for each field, which value is shown, whether a hint
//! or an authoritative error is visible, and whether the input is disabled;
//! plus the submit control state, the success banner, and the general error.
//! The client engine derives it from live state; the server derives it from
//! a [`SubmissionResult`] when rendering a full page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::field::FieldId;
use crate::core::field::FieldValue;
use crate::core::form::ContactPayload;
use crate::core::messages::MessageKey;
use crate::core::submission::SubmissionResult;

// ============================================================================
// SECTION: Field View
// ============================================================================

/// What one field shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Field identifier.
    pub field: FieldId,
    /// Value displayed in the input.
    pub value: FieldValue,
    /// Visible live hint, if any.
    pub hint: Option<&'static str>,
    /// Visible authoritative error, if any.
    pub error: Option<String>,
    /// Whether the input is disabled.
    pub disabled: bool,
}

impl FieldView {
    /// Creates a view with no hint or error.
    #[must_use]
    pub const fn plain(field: FieldId, value: FieldValue) -> Self {
        Self {
            field,
            value,
            hint: None,
            error: None,
            disabled: false,
        }
    }

    /// Returns true when an authoritative error is visible.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the label text.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.field {
            FieldId::Message => MessageKey::MessageLabel.text(),
            FieldId::Email => MessageKey::EmailLabel.text(),
            FieldId::Terms => MessageKey::TermsLabel.text(),
        }
    }

    /// Returns the placeholder text for text inputs.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.field {
            FieldId::Message => Some(MessageKey::MessagePlaceholder.text()),
            FieldId::Email => Some(MessageKey::EmailPlaceholder.text()),
            FieldId::Terms => None,
        }
    }
}

// ============================================================================
// SECTION: Form View
// ============================================================================

/// What the whole form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// Message field.
    pub message: FieldView,
    /// Email field.
    pub email: FieldView,
    /// Terms field.
    pub terms: FieldView,
    /// Whether the submit control is enabled.
    pub submit_enabled: bool,
    /// Submit control label.
    pub submit_label: &'static str,
    /// Visible success confirmation, if any.
    pub success: Option<&'static str>,
    /// Visible general error, if any.
    pub general_error: Option<String>,
}

impl FormView {
    /// Returns the view of `field`.
    #[must_use]
    pub const fn field(&self, field: FieldId) -> &FieldView {
        match field {
            FieldId::Message => &self.message,
            FieldId::Email => &self.email,
            FieldId::Terms => &self.terms,
        }
    }

    /// Returns all field views in rendering order.
    #[must_use]
    pub const fn fields(&self) -> [&FieldView; 3] {
        [&self.message, &self.email, &self.terms]
    }

    /// Builds the view for a server-rendered page.
    ///
    /// Without script nothing gates the submit control, so it is always
    /// enabled and no hints are shown; the server decides. On success the
    /// fields are rendered empty; otherwise the submitted values are kept.
    #[must_use]
    pub fn server_rendered(values: &ContactPayload, result: Option<&SubmissionResult>) -> Self {
        let shown = match result {
            Some(SubmissionResult::Success) => ContactPayload::default(),
            _ => values.clone(),
        };
        let field_view = |field: FieldId| FieldView {
            error: result
                .and_then(|result| result.error_for(field))
                .map(|error| error.message.clone()),
            ..FieldView::plain(field, shown.value(field))
        };
        Self {
            message: field_view(FieldId::Message),
            email: field_view(FieldId::Email),
            terms: field_view(FieldId::Terms),
            submit_enabled: true,
            submit_label: MessageKey::SubmitIdle.text(),
            success: result
                .filter(|result| result.is_success())
                .map(|_| MessageKey::Success.text()),
            general_error: result.and_then(SubmissionResult::general_message).map(str::to_string),
        }
    }
}
