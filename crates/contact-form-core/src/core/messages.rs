// crates/contact-form-core/src/core/messages.rs
// ============================================================================
// Module: Contact Form Message Catalog
// Description: Static catalog of user-visible Swedish form strings.
// Purpose: Keep hint, error, and status texts in one place for both renderers.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Every string a visitor can see on the form is looked up here by
//! [`MessageKey`]. Constraints and rejections refer to keys, never to
//! literals, so the scripted and no-script renderers cannot drift apart.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Texts are matched byte-for-byte by the page contract; do not reword.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Keys
// ============================================================================

/// Key into the form message catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Empty message (hint and error share the text).
    MessageMissing,
    /// Message exceeds the maximum length.
    MessageTooLong,
    /// Live hint for a missing or malformed email.
    EmailHint,
    /// Authoritative error for a missing email.
    EmailMissing,
    /// Authoritative error for a malformed email.
    EmailInvalidFormat,
    /// Email exceeds the maximum length.
    EmailTooLong,
    /// Terms checkbox left unchecked.
    TermsNotAccepted,
    /// Confirmation shown after an accepted submission.
    Success,
    /// General server error wrapper with a `{detail}` placeholder.
    GeneralError,
    /// Detail used when the message could not be persisted.
    StoreFailed,
    /// Detail used when the server could not be reached.
    TransportFailed,
    /// Detail used when the request body could not be decoded.
    BadRequest,
    /// Detail used for the redirect-only database error token.
    UnknownDatabaseError,
    /// Submit control label while idle.
    SubmitIdle,
    /// Submit control label while a submission is in flight.
    SubmitPending,
    /// Label for the message textarea.
    MessageLabel,
    /// Placeholder for the message textarea.
    MessagePlaceholder,
    /// Label for the email input.
    EmailLabel,
    /// Placeholder for the email input.
    EmailPlaceholder,
    /// Label for the terms checkbox.
    TermsLabel,
}

impl MessageKey {
    /// Every key, used to verify catalog completeness.
    pub const ALL: [Self; 20] = [
        Self::MessageMissing,
        Self::MessageTooLong,
        Self::EmailHint,
        Self::EmailMissing,
        Self::EmailInvalidFormat,
        Self::EmailTooLong,
        Self::TermsNotAccepted,
        Self::Success,
        Self::GeneralError,
        Self::StoreFailed,
        Self::TransportFailed,
        Self::BadRequest,
        Self::UnknownDatabaseError,
        Self::SubmitIdle,
        Self::SubmitPending,
        Self::MessageLabel,
        Self::MessagePlaceholder,
        Self::EmailLabel,
        Self::EmailPlaceholder,
        Self::TermsLabel,
    ];

    /// Returns the catalog key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MessageMissing => "message.missing",
            Self::MessageTooLong => "message.too_long",
            Self::EmailHint => "email.hint",
            Self::EmailMissing => "email.missing",
            Self::EmailInvalidFormat => "email.invalid_format",
            Self::EmailTooLong => "email.too_long",
            Self::TermsNotAccepted => "terms.not_accepted",
            Self::Success => "form.success",
            Self::GeneralError => "form.error.general",
            Self::StoreFailed => "form.error.store_failed",
            Self::TransportFailed => "form.error.transport_failed",
            Self::BadRequest => "form.error.bad_request",
            Self::UnknownDatabaseError => "form.error.unknown_database",
            Self::SubmitIdle => "form.submit.idle",
            Self::SubmitPending => "form.submit.pending",
            Self::MessageLabel => "form.label.message",
            Self::MessagePlaceholder => "form.placeholder.message",
            Self::EmailLabel => "form.label.email",
            Self::EmailPlaceholder => "form.placeholder.email",
            Self::TermsLabel => "form.label.terms",
        }
    }

    /// Returns the catalog text for this key.
    #[must_use]
    pub fn text(self) -> &'static str {
        text(self)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries.
const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("message.missing", "Meddelandet får inte vara tomt."),
    ("message.too_long", "Meddelandet är för långt (max 5000 tecken)."),
    ("email.hint", "Ange en giltig email."),
    ("email.missing", "Ange en email-adress."),
    ("email.invalid_format", "Ange en giltig email-adress."),
    ("email.too_long", "E-postadressen är för lång (max 254 tecken)."),
    ("terms.not_accepted", "Du måste acceptera villkoren för att skicka meddelandet."),
    ("form.success", "Ditt meddelande är mottaget. Vi återkopplar snart."),
    ("form.error.general", "Ett serverfel uppstod: {detail}"),
    ("form.error.store_failed", "Kunde inte spara meddelandet."),
    ("form.error.transport_failed", "Kunde inte nå servern."),
    ("form.error.bad_request", "Ogiltig förfrågan."),
    ("form.error.unknown_database", "Okänt databasfel"),
    ("form.submit.idle", "Skicka"),
    ("form.submit.pending", "Skickar..."),
    ("form.label.message", "Skriv ett meddelande:"),
    ("form.placeholder.message", "Meddelande..."),
    ("form.label.email", "Ange din email:"),
    ("form.placeholder.email", "Din email..."),
    (
        "form.label.terms",
        "Jag accepterar att informationen sparas. Uppgifterna tas bort efter slutfört ärende.",
    ),
];

/// Returns the catalog template for `key`, falling back to the key itself.
#[must_use]
pub fn text(key: MessageKey) -> &'static str {
    let name = key.as_str();
    catalog().get(name).copied().unwrap_or(name)
}

/// Returns the catalog text for `key` with `{placeholder}` arguments substituted.
#[must_use]
pub fn translate(key: MessageKey, args: &[(&str, &str)]) -> String {
    let mut result = text(key).to_string();
    for (name, value) in args {
        let placeholder = format!("{{{name}}}");
        result = result.replace(&placeholder, value);
    }
    result
}

/// Formats the general server error for a detail string.
#[must_use]
pub fn general_error(detail: &str) -> String {
    translate(MessageKey::GeneralError, &[("detail", detail)])
}

/// Returns the static catalog.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    CATALOG.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::use_debug,
        reason = "Test fixtures use explicit asserts with debug output."
    )]

    use super::*;

    #[test]
    fn every_key_has_a_catalog_entry() {
        for key in MessageKey::ALL {
            assert!(catalog().contains_key(key.as_str()), "missing catalog entry for {key:?}");
        }
    }

    #[test]
    fn general_error_substitutes_detail() {
        assert_eq!(general_error("boom"), "Ett serverfel uppstod: boom");
    }
}
