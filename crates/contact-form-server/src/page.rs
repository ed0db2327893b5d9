// crates/contact-form-server/src/page.rs
// ============================================================================
// Module: Contact Page Renderer
// Description: Full-page HTML rendering of the contact form view.
// Purpose: Present submission outcomes to clients without script.
// Dependencies: contact-form-core
// ============================================================================

//! ## Overview
//! [`render_page`] turns a [`FormView`] into a complete HTML document. The
//! element identifiers are a stable contract: `#message`, `#email`,
//! `#terms`, `[data-testid=contact-form-submit]`, `p.success-message`,
//! `p.error-message#<field>-error`, `p.error-message.general-error`, and
//! `div.form-field p.hint-message`. Offending inputs carry `class="error"`
//! and `aria-invalid="true"`.
//!
//! The form also carries `data-success-display-ms`, telling an enhancing
//! script how long to keep the success confirmation visible.
//!
//! Every interpolated string is escaped; submitted values are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;
use std::time::Duration;

use contact_form_core::FieldId;
use contact_form_core::FieldView;
use contact_form_core::FormView;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Form action for plain form posts.
pub const FORM_ACTION: &str = "/api/contact";
/// Fragment identifying the contact section.
pub const CONTACT_ANCHOR: &str = "contact";

/// Minimal styling so hints and errors are distinguishable.
const STYLE: &str = ".form-field{margin-bottom:1rem}.error{border-color:#b00020}\
.error-message{color:#b00020}.hint-message{color:#8a5a00}.success-message{color:#1b5e20}";

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the complete contact page for `view`.
#[must_use]
pub fn render_page(view: &FormView, success_display: Duration) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"sv\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Kontakt</title>\n",
    );
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<section id=\"{CONTACT_ANCHOR}\">");
    html.push_str(&render_form(view, success_display));
    html.push_str("</section>\n</body>\n</html>\n");
    html
}

/// Renders the form element.
fn render_form(view: &FormView, success_display: Duration) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<form data-testid=\"contact-form\" method=\"post\" action=\"{FORM_ACTION}\" \
         data-success-display-ms=\"{}\" novalidate>",
        success_display.as_millis()
    );
    html.push_str(&render_message(&view.message));
    html.push_str(&render_email(&view.email));
    html.push_str(&render_terms(&view.terms));
    let _ = writeln!(
        html,
        "<button type=\"submit\" data-testid=\"contact-form-submit\"{}>{}</button>",
        disabled_attr(!view.submit_enabled),
        escape_html(view.submit_label)
    );
    if let Some(success) = view.success {
        let _ = writeln!(html, "<p class=\"success-message\">{}</p>", escape_html(success));
    }
    if let Some(general) = &view.general_error {
        let _ = writeln!(
            html,
            "<p class=\"error-message general-error\" role=\"alert\">{}</p>",
            escape_html(general)
        );
    }
    html.push_str("</form>\n");
    html
}

/// Renders the message textarea.
fn render_message(field: &FieldView) -> String {
    let mut html = String::from("<div class=\"form-field\">\n");
    let _ = writeln!(
        html,
        "<label for=\"{id}\">{label}</label>\n<textarea id=\"{id}\" name=\"{id}\" rows=\"6\" \
         placeholder=\"{placeholder}\"{state}>{value}</textarea>",
        id = FieldId::Message.as_str(),
        label = escape_html(field.label()),
        placeholder = escape_html(field.placeholder().unwrap_or_default()),
        state = input_state_attrs(field),
        value = escape_html(field.value.as_text()),
    );
    html.push_str(&render_feedback(field));
    html.push_str("</div>\n");
    html
}

/// Renders the email input.
fn render_email(field: &FieldView) -> String {
    let mut html = String::from("<div class=\"form-field\">\n");
    let _ = writeln!(
        html,
        "<label for=\"{id}\">{label}</label>\n<input type=\"email\" id=\"{id}\" name=\"{id}\" \
         placeholder=\"{placeholder}\" value=\"{value}\"{state}>",
        id = FieldId::Email.as_str(),
        label = escape_html(field.label()),
        placeholder = escape_html(field.placeholder().unwrap_or_default()),
        value = escape_html(field.value.as_text()),
        state = input_state_attrs(field),
    );
    html.push_str(&render_feedback(field));
    html.push_str("</div>\n");
    html
}

/// Renders the terms checkbox.
fn render_terms(field: &FieldView) -> String {
    let mut html = String::from("<div class=\"form-field checkbox-field\">\n");
    let _ = writeln!(
        html,
        "<input type=\"checkbox\" id=\"{id}\" name=\"{id}\"{checked}{state}>\n<label \
         for=\"{id}\">{label}</label>",
        id = FieldId::Terms.as_str(),
        checked = if field.value.is_checked() { " checked" } else { "" },
        state = input_state_attrs(field),
        label = escape_html(field.label()),
    );
    html.push_str(&render_feedback(field));
    html.push_str("</div>\n");
    html
}

/// Renders the error or hint paragraph for a field.
fn render_feedback(field: &FieldView) -> String {
    if let Some(error) = &field.error {
        return format!(
            "<p class=\"error-message\" id=\"{}\">{}</p>\n",
            field.field.error_region_id(),
            escape_html(error)
        );
    }
    field
        .hint
        .map(|hint| format!("<p class=\"hint-message\">{}</p>\n", escape_html(hint)))
        .unwrap_or_default()
}

/// Returns error and disabled attributes for an input.
fn input_state_attrs(field: &FieldView) -> String {
    let mut attrs = String::new();
    if field.has_error() {
        let _ = write!(
            attrs,
            " class=\"error\" aria-invalid=\"true\" aria-describedby=\"{}\"",
            field.field.error_region_id()
        );
    }
    attrs.push_str(disabled_attr(field.disabled));
    attrs
}

/// Returns the disabled attribute when `disabled` holds.
const fn disabled_attr(disabled: bool) -> &'static str {
    if disabled { " disabled" } else { "" }
}

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
