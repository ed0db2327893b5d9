// crates/contact-form-core/src/core/field.rs
// ============================================================================
// Module: Contact Form Fields
// Description: Field identifiers and field values for the contact form.
// Purpose: Give every layer one typed vocabulary for the three form fields.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The contact form has exactly three fields: a free-text message, an email
//! address, and a terms checkbox. [`FieldId`] names them and carries the
//! stable element identifiers the page structure relies on; [`FieldValue`]
//! holds what the user entered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Field Identifiers
// ============================================================================

/// Identifier for a contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// Free-text message body.
    Message,
    /// Sender email address.
    Email,
    /// Terms acceptance checkbox.
    Terms,
}

impl FieldId {
    /// All fields in rendering order.
    pub const ALL: [Self; 3] = [Self::Message, Self::Email, Self::Terms];

    /// Returns the form field name (also the input element id).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Email => "email",
            Self::Terms => "terms",
        }
    }

    /// Returns the element id of the authoritative error region.
    #[must_use]
    pub const fn error_region_id(self) -> &'static str {
        match self {
            Self::Message => "message-error",
            Self::Email => "email-error",
            Self::Terms => "terms-error",
        }
    }

    /// Returns true when the field holds text rather than a checked flag.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Message | Self::Email)
    }

    /// Parses a form field name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Field Values
// ============================================================================

/// Value entered into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text entered into the message or email input.
    Text(String),
    /// Checked state of the terms checkbox.
    Flag(bool),
}

impl FieldValue {
    /// Builds a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a checkbox value.
    #[must_use]
    pub const fn flag(checked: bool) -> Self {
        Self::Flag(checked)
    }

    /// Returns the text content; flags read as empty text.
    #[must_use]
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(value) => value,
            Self::Flag(_) => "",
        }
    }

    /// Returns the checked state.
    ///
    /// Text follows HTML checkbox semantics: any non-blank submitted value
    /// (typically `on`) means checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        match self {
            Self::Flag(checked) => *checked,
            Self::Text(value) => !value.trim().is_empty(),
        }
    }
}
