// crates/contact-form-core/src/core/constraints.rs
// ============================================================================
// Module: Field Constraints
// Description: Static constraint table shared by client and server validation.
// Purpose: Define every field rule once, with its threshold and rejection.
// Dependencies: crate::core::{field, validation}
// ============================================================================

//! ## Overview
//! [`CONSTRAINTS`] lists every rule the contact form enforces, in the order
//! they are checked. Both the live client engine and the authoritative server
//! service evaluate this same table, so the two can only disagree about
//! *where* a result is shown, never about *what* the result is.
//!
//! ## Invariants
//! - Per field, constraints run in order: required, max length, format.
//! - Thresholds count `char`s of the trimmed value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::field::FieldId;
use crate::core::field::FieldValue;
use crate::core::validation::FieldRejection;
use crate::core::validation::is_email_shape;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 5_000;
/// Maximum email length in characters.
pub const MAX_EMAIL_CHARS: usize = 254;
/// Widest encoding of one `char` in a request body: four UTF-8 bytes each
/// written as `%XX` in a form post, or a `\uXXXX` surrogate pair in JSON.
pub const MAX_ENCODED_CHAR_BYTES: usize = 12;
/// Member names and punctuation of the larger (JSON) body encoding.
const PAYLOAD_FRAMING_BYTES: usize = r#"{"message":"","email":"","terms":false}"#.len();
/// Worst-case request body size of a valid payload whose text fields are trimmed.
///
/// A server body limit below this value would reject payloads the shared
/// validators accept.
pub const MAX_VALID_PAYLOAD_BYTES: usize =
    (MAX_MESSAGE_CHARS + MAX_EMAIL_CHARS) * MAX_ENCODED_CHAR_BYTES + PAYLOAD_FRAMING_BYTES;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Format rules a text field may be held to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// Address shape `local@domain`.
    EmailAddress,
}

/// Kind of check a constraint performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Text must be non-blank; a checkbox must be checked.
    Required,
    /// Trimmed text must not exceed the given number of characters.
    MaxLength(usize),
    /// Trimmed text must match the format rule.
    Format(FormatRule),
}

/// A single field rule and the rejection it produces when violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConstraint {
    /// Field the rule applies to.
    pub field: FieldId,
    /// Check performed.
    pub kind: ConstraintKind,
    /// Rejection reported when the check fails.
    pub rejection: FieldRejection,
}

impl FieldConstraint {
    /// Returns true when `value` satisfies this constraint.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &FieldValue) -> bool {
        match self.kind {
            ConstraintKind::Required => {
                if self.field.is_text() {
                    !value.as_text().trim().is_empty()
                } else {
                    value.is_checked()
                }
            }
            ConstraintKind::MaxLength(max) => value.as_text().trim().chars().count() <= max,
            ConstraintKind::Format(FormatRule::EmailAddress) => {
                is_email_shape(value.as_text().trim())
            }
        }
    }
}

// ============================================================================
// SECTION: Constraint Table
// ============================================================================

/// Every contact form constraint, in evaluation order.
pub const CONSTRAINTS: &[FieldConstraint] = &[
    FieldConstraint {
        field: FieldId::Message,
        kind: ConstraintKind::Required,
        rejection: FieldRejection::MissingMessage,
    },
    FieldConstraint {
        field: FieldId::Message,
        kind: ConstraintKind::MaxLength(MAX_MESSAGE_CHARS),
        rejection: FieldRejection::MessageTooLong,
    },
    FieldConstraint {
        field: FieldId::Email,
        kind: ConstraintKind::Required,
        rejection: FieldRejection::MissingEmail,
    },
    FieldConstraint {
        field: FieldId::Email,
        kind: ConstraintKind::MaxLength(MAX_EMAIL_CHARS),
        rejection: FieldRejection::EmailTooLong,
    },
    FieldConstraint {
        field: FieldId::Email,
        kind: ConstraintKind::Format(FormatRule::EmailAddress),
        rejection: FieldRejection::InvalidEmailFormat,
    },
    FieldConstraint {
        field: FieldId::Terms,
        kind: ConstraintKind::Required,
        rejection: FieldRejection::TermsNotAccepted,
    },
];

/// Returns the constraints for `field` in evaluation order.
pub fn constraints_for(field: FieldId) -> impl Iterator<Item = &'static FieldConstraint> {
    CONSTRAINTS.iter().filter(move |constraint| constraint.field == field)
}
