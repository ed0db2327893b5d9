// crates/contact-form-core/src/core/mod.rs
// ============================================================================
// Module: Contact Form Core Types
// Description: Fields, constraints, messages, validation, and form state.
// Purpose: Group the pure, side-effect-free building blocks of the form.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Pure domain types. Nothing in this module performs I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod constraints;
pub mod field;
pub mod form;
pub mod messages;
pub mod submission;
pub mod validation;
pub mod view;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use constraints::CONSTRAINTS;
pub use constraints::ConstraintKind;
pub use constraints::FieldConstraint;
pub use constraints::FormatRule;
pub use constraints::MAX_EMAIL_CHARS;
pub use constraints::MAX_ENCODED_CHAR_BYTES;
pub use constraints::MAX_MESSAGE_CHARS;
pub use constraints::MAX_VALID_PAYLOAD_BYTES;
pub use constraints::constraints_for;
pub use field::FieldId;
pub use field::FieldValue;
pub use form::ContactPayload;
pub use form::FormChange;
pub use form::FormListener;
pub use form::FormState;
pub use form::SubscriptionId;
pub use messages::MessageKey;
pub use submission::FieldErrors;
pub use submission::SubmissionPhase;
pub use submission::SubmissionResult;
pub use validation::FieldError;
pub use validation::FieldRejection;
pub use validation::Hint;
pub use validation::UnknownRejection;
pub use validation::ValidationOutcome;
pub use validation::is_email_shape;
pub use validation::validate;
pub use validation::validate_email;
pub use validation::validate_message;
pub use validation::validate_terms;
pub use view::FieldView;
pub use view::FormView;
