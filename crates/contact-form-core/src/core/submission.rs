// crates/contact-form-core/src/core/submission.rs
// ============================================================================
// Module: Submission Results
// Description: Authoritative submission outcome and submission phases.
// Purpose: One result contract consumed by both presentation adapters.
// Dependencies: serde, crate::core::{field, messages, validation}
// ============================================================================

//! ## Overview
//! [`SubmissionResult`] is produced only by the server-side service. The
//! scripted client receives it as JSON; the no-script page renderer turns it
//! into markup. Field rejections are always attributed to their field; the
//! general error is reserved for failures that no field caused.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::field::FieldId;
use crate::core::messages::general_error;
use crate::core::validation::FieldError;
use crate::core::validation::FieldRejection;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Authoritative errors keyed by field.
pub type FieldErrors = BTreeMap<FieldId, FieldError>;

/// Outcome of a submission as decided by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResult {
    /// The message was accepted and persisted.
    Success,
    /// One or more fields were rejected.
    FieldErrors {
        /// Rejections keyed by field.
        errors: FieldErrors,
    },
    /// A failure not attributable to any field.
    GeneralError {
        /// Display text.
        message: String,
    },
}

impl SubmissionResult {
    /// Builds a field error result, keeping the first rejection per field.
    #[must_use]
    pub fn from_rejections(rejections: impl IntoIterator<Item = FieldRejection>) -> Self {
        let mut errors = FieldErrors::new();
        for rejection in rejections {
            errors
                .entry(rejection.field())
                .or_insert_with(|| FieldError::from_rejection(rejection));
        }
        Self::FieldErrors {
            errors,
        }
    }

    /// Builds a general error result around `detail`.
    #[must_use]
    pub fn general(detail: &str) -> Self {
        Self::GeneralError {
            message: general_error(detail),
        }
    }

    /// Returns true for [`SubmissionResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the authoritative error for `field`, if any.
    #[must_use]
    pub fn error_for(&self, field: FieldId) -> Option<&FieldError> {
        match self {
            Self::FieldErrors {
                errors,
            } => errors.get(&field),
            Self::Success | Self::GeneralError {
                ..
            } => None,
        }
    }

    /// Returns the rejected fields in field order.
    #[must_use]
    pub fn rejected_fields(&self) -> Vec<FieldId> {
        match self {
            Self::FieldErrors {
                errors,
            } => errors.keys().copied().collect(),
            Self::Success | Self::GeneralError {
                ..
            } => Vec::new(),
        }
    }

    /// Returns the general error text, if any.
    #[must_use]
    pub fn general_message(&self) -> Option<&str> {
        match self {
            Self::GeneralError {
                message,
            } => Some(message),
            Self::Success | Self::FieldErrors {
                ..
            } => None,
        }
    }

    /// Returns a stable outcome label for logs.
    #[must_use]
    pub const fn outcome_label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::FieldErrors {
                ..
            } => "field_errors",
            Self::GeneralError {
                ..
            } => "general_error",
        }
    }
}

// ============================================================================
// SECTION: Phases
// ============================================================================

/// Submission state machine.
///
/// `Idle -> Submitting -> {Succeeded, Rejected, Failed}`; the next accepted
/// submission starts from any terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// No submission has been made, or the form was reset.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The last submission was accepted.
    Succeeded,
    /// The last submission had field errors.
    Rejected,
    /// The last submission failed for a non-field reason.
    Failed,
}

impl SubmissionPhase {
    /// Returns the terminal phase for a result.
    #[must_use]
    pub const fn after(result: &SubmissionResult) -> Self {
        match result {
            SubmissionResult::Success => Self::Succeeded,
            SubmissionResult::FieldErrors {
                ..
            } => Self::Rejected,
            SubmissionResult::GeneralError {
                ..
            } => Self::Failed,
        }
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub const fn is_in_flight(self) -> bool {
        matches!(self, Self::Submitting)
    }
}
