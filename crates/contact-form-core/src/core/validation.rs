// crates/contact-form-core/src/core/validation.rs
// ============================================================================
// Module: Field Validators
// Description: Pure per-field validation returning typed outcomes.
// Purpose: One total validation function shared by client and server.
// Dependencies: serde, thiserror, crate::core::{constraints, field, messages}
// ============================================================================

//! ## Overview
//! [`validate`] runs the [`CONSTRAINTS`](crate::core::constraints::CONSTRAINTS)
//! for one field and returns a [`ValidationOutcome`]. It never fails and has
//! no side effects. A rejection can be presented two ways: as a soft
//! [`Hint`] while the visitor is editing, or as an authoritative
//! [`FieldError`] once the server has spoken.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::constraints::constraints_for;
use crate::core::field::FieldId;
use crate::core::field::FieldValue;
use crate::core::messages::MessageKey;

// ============================================================================
// SECTION: Rejections
// ============================================================================

/// Reason a field value was rejected.
///
/// Variant names are stable: they are the `error=` tokens of the no-script
/// redirect contract and the `kind` of serialized field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldRejection {
    /// Message is empty after trimming.
    MissingMessage,
    /// Message exceeds the maximum length.
    MessageTooLong,
    /// Email is empty after trimming.
    MissingEmail,
    /// Email does not have the address shape.
    InvalidEmailFormat,
    /// Email exceeds the maximum length.
    EmailTooLong,
    /// Terms were not accepted.
    TermsNotAccepted,
}

impl FieldRejection {
    /// All rejections.
    pub const ALL: [Self; 6] = [
        Self::MissingMessage,
        Self::MessageTooLong,
        Self::MissingEmail,
        Self::InvalidEmailFormat,
        Self::EmailTooLong,
        Self::TermsNotAccepted,
    ];

    /// Returns the field this rejection is attributed to.
    #[must_use]
    pub const fn field(self) -> FieldId {
        match self {
            Self::MissingMessage | Self::MessageTooLong => FieldId::Message,
            Self::MissingEmail | Self::InvalidEmailFormat | Self::EmailTooLong => FieldId::Email,
            Self::TermsNotAccepted => FieldId::Terms,
        }
    }

    /// Returns the stable variant name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingMessage => "MissingMessage",
            Self::MessageTooLong => "MessageTooLong",
            Self::MissingEmail => "MissingEmail",
            Self::InvalidEmailFormat => "InvalidEmailFormat",
            Self::EmailTooLong => "EmailTooLong",
            Self::TermsNotAccepted => "TermsNotAccepted",
        }
    }

    /// Returns the catalog key of the live hint, if this rejection has one.
    #[must_use]
    pub const fn hint_key(self) -> Option<MessageKey> {
        match self {
            Self::MissingMessage => Some(MessageKey::MessageMissing),
            Self::MessageTooLong => Some(MessageKey::MessageTooLong),
            Self::MissingEmail | Self::InvalidEmailFormat => Some(MessageKey::EmailHint),
            Self::EmailTooLong => Some(MessageKey::EmailTooLong),
            Self::TermsNotAccepted => None,
        }
    }

    /// Returns the catalog key of the authoritative error.
    #[must_use]
    pub const fn error_key(self) -> MessageKey {
        match self {
            Self::MissingMessage => MessageKey::MessageMissing,
            Self::MessageTooLong => MessageKey::MessageTooLong,
            Self::MissingEmail => MessageKey::EmailMissing,
            Self::InvalidEmailFormat => MessageKey::EmailInvalidFormat,
            Self::EmailTooLong => MessageKey::EmailTooLong,
            Self::TermsNotAccepted => MessageKey::TermsNotAccepted,
        }
    }

    /// Returns the live hint text, if any.
    #[must_use]
    pub fn hint_text(self) -> Option<&'static str> {
        self.hint_key().map(MessageKey::text)
    }

    /// Returns the authoritative error text.
    #[must_use]
    pub fn error_text(self) -> &'static str {
        self.error_key().text()
    }
}

impl fmt::Display for FieldRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a rejection token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field rejection: {0}")]
pub struct UnknownRejection(pub String);

impl FromStr for FieldRejection {
    type Err = UnknownRejection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rejection| rejection.as_str() == value)
            .ok_or_else(|| UnknownRejection(value.to_string()))
    }
}

// ============================================================================
// SECTION: Presentations
// ============================================================================

/// Soft, client-only message shown while a field is invalid during editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    /// Field the hint belongs to.
    pub field: FieldId,
    /// Underlying rejection.
    pub rejection: FieldRejection,
    /// Display text.
    pub text: &'static str,
}

/// Authoritative field error produced by server-side validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field the error is attributed to.
    pub field: FieldId,
    /// Underlying rejection.
    pub kind: FieldRejection,
    /// Display text.
    pub message: String,
}

impl FieldError {
    /// Builds the authoritative error for a rejection.
    #[must_use]
    pub fn from_rejection(rejection: FieldRejection) -> Self {
        Self {
            field: rejection.field(),
            kind: rejection,
            message: rejection.error_text().to_string(),
        }
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of validating one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The value satisfies every constraint.
    Valid,
    /// The value violates a constraint.
    Invalid(FieldRejection),
}

impl ValidationOutcome {
    /// Returns true for [`ValidationOutcome::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub const fn rejection(self) -> Option<FieldRejection> {
        match self {
            Self::Valid => None,
            Self::Invalid(rejection) => Some(rejection),
        }
    }

    /// Returns the soft hint for an invalid outcome, if the rejection has one.
    #[must_use]
    pub fn hint(self) -> Option<Hint> {
        let rejection = self.rejection()?;
        let text = rejection.hint_text()?;
        Some(Hint {
            field: rejection.field(),
            rejection,
            text,
        })
    }

    /// Returns the authoritative error for an invalid outcome.
    #[must_use]
    pub fn error(self) -> Option<FieldError> {
        self.rejection().map(FieldError::from_rejection)
    }
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Validates `value` for `field` against the shared constraint table.
#[must_use]
pub fn validate(field: FieldId, value: &FieldValue) -> ValidationOutcome {
    constraints_for(field).find(|constraint| !constraint.is_satisfied_by(value)).map_or(
        ValidationOutcome::Valid,
        |constraint| ValidationOutcome::Invalid(constraint.rejection),
    )
}

/// Validates a message body.
#[must_use]
pub fn validate_message(message: &str) -> ValidationOutcome {
    validate(FieldId::Message, &FieldValue::text(message))
}

/// Validates an email address.
#[must_use]
pub fn validate_email(email: &str) -> ValidationOutcome {
    validate(FieldId::Email, &FieldValue::text(email))
}

/// Validates the terms checkbox.
#[must_use]
pub fn validate_terms(accepted: bool) -> ValidationOutcome {
    validate(FieldId::Terms, &FieldValue::flag(accepted))
}

/// Returns true when `value` has the shape `local@domain`.
///
/// Exactly one `@`, non-empty local part and domain, no whitespace or control
/// characters, and no empty domain label.
#[must_use]
pub fn is_email_shape(value: &str) -> bool {
    if value.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    !domain.starts_with('.') && !domain.ends_with('.') && !domain.contains("..")
}
