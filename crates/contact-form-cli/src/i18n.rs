// crates/contact-form-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing CLI strings in English and Swedish.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! All runtime output of the `contact-form` binary is routed through the
//! [`t!`](crate::t) macro. Missing keys fall back to English and then to the
//! key itself.
//!
//! Form texts shown to visitors live in the core message catalog; this
//! catalog only covers operator-facing CLI output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Swedish.
    Sv,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Sv => "sv",
        }
    }

    /// Parses a locale value, case-insensitive and tolerant of region tags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("sv") => Some(Self::Sv),
            _ => None,
        }
    }
}

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Preformatted value.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`].
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "contact-form {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("serve.bind.invalid", "Invalid bind address {bind}."),
    ("serve.init_failed", "Failed to initialize server: {error}"),
    ("serve.failed", "Server failed: {error}"),
    ("serve.listening", "Serving contact form on http://{bind} (store: {store})"),
    ("check.serialize_failed", "Failed to serialize result: {error}"),
    ("submit.url_invalid", "Invalid server URL {url}: {error}"),
    ("submit.transport_failed", "Failed to create HTTP client: {error}"),
    ("submit.invalid", "Not submitted; the form is not valid:"),
    ("submit.accepted", "Message accepted."),
    ("submit.rejected", "Message rejected:"),
    ("submit.failed", "Submission failed: {message}"),
    ("submit.cause", "Cause: {error}"),
    ("submit.field", "- {field}: {message}"),
    ("submit.busy", "A submission is already in flight."),
    ("store.memory_unsupported", "The memory store is not persistent; configure a sqlite store."),
    ("store.open_failed", "Failed to open message store: {error}"),
    ("store.list.failed", "Failed to read messages: {error}"),
    ("store.list.header", "Stored messages:"),
    ("store.list.none", "No messages found."),
    ("store.list.entry", "- #{id} received_at={received_at} email={email}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'sv'."),
];

/// Swedish catalog entries.
const CATALOG_SV: &[(&str, &str)] = &[
    ("main.version", "contact-form {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "utdata"),
    ("output.write_failed", "Kunde inte skriva till {stream}: {error}"),
    ("config.load_failed", "Kunde inte läsa konfigurationen: {error}"),
    ("config.validate.ok", "Konfigurationen är giltig."),
    ("serve.bind.invalid", "Ogiltig bindningsadress {bind}."),
    ("serve.init_failed", "Kunde inte starta servern: {error}"),
    ("serve.failed", "Servern avbröts: {error}"),
    ("serve.listening", "Kontaktformuläret körs på http://{bind} (lagring: {store})"),
    ("check.serialize_failed", "Kunde inte serialisera resultatet: {error}"),
    ("submit.url_invalid", "Ogiltig server-URL {url}: {error}"),
    ("submit.transport_failed", "Kunde inte skapa HTTP-klienten: {error}"),
    ("submit.invalid", "Skickades inte; formuläret är inte giltigt:"),
    ("submit.accepted", "Meddelandet togs emot."),
    ("submit.rejected", "Meddelandet avvisades:"),
    ("submit.failed", "Inskickningen misslyckades: {message}"),
    ("submit.cause", "Orsak: {error}"),
    ("submit.field", "- {field}: {message}"),
    ("submit.busy", "En inskickning pågår redan."),
    ("store.memory_unsupported", "Minneslagringen är inte beständig; konfigurera sqlite."),
    ("store.open_failed", "Kunde inte öppna meddelandelagringen: {error}"),
    ("store.list.failed", "Kunde inte läsa meddelanden: {error}"),
    ("store.list.header", "Sparade meddelanden:"),
    ("store.list.none", "Inga meddelanden hittades."),
    ("store.list.entry", "- #{id} received_at={received_at} email={email}"),
    ("i18n.lang.invalid_env", "Ogiltigt värde för {env}: {value}. Förväntade 'en' eller 'sv'."),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_SV_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Sv => CATALOG_SV_MAP.get_or_init(|| CATALOG_SV.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, args)
}

/// Translates `key` for an explicit locale.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// ============================================================================
// SECTION: Tests
// ============================================================================
