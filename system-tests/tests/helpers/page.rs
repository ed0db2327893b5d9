// system-tests/tests/helpers/page.rs
// ============================================================================
// Module: Page Inspection Helpers
// Description: Minimal lookups over the rendered contact page.
// Purpose: Assert on the stable element contract without a DOM parser.
// Dependencies: contact-form-core
// ============================================================================

use contact_form_core::FieldId;

/// Returns the text of the error region of `field`, if rendered.
pub fn error_region(page: &str, field: FieldId) -> Option<String> {
    let marker = format!("id=\"{}\">", field.error_region_id());
    let start = page.find(&marker)? + marker.len();
    let end = page[start..].find("</p>")?;
    Some(page[start..start + end].to_string())
}

/// Returns the opening tag of the input for `field`.
pub fn input_tag(page: &str, field: FieldId) -> Option<&str> {
    let marker = format!("id=\"{}\" name=", field.as_str());
    let at = page.find(&marker)?;
    let start = page[..at].rfind('<')?;
    let end = at + page[at..].find('>')?;
    Some(&page[start..=end])
}

/// Returns true when the input for `field` is marked invalid.
pub fn input_marked_invalid(page: &str, field: FieldId) -> bool {
    input_tag(page, field)
        .is_some_and(|tag| tag.contains("class=\"error\"") && tag.contains("aria-invalid=\"true\""))
}

/// Returns the fields with a rendered error region, in field order.
pub fn fields_with_errors(page: &str) -> Vec<FieldId> {
    FieldId::ALL.into_iter().filter(|field| error_region(page, *field).is_some()).collect()
}

/// Returns the text of the success region, if rendered.
pub fn success_region(page: &str) -> Option<String> {
    region_text(page, "<p class=\"success-message\">")
}

/// Returns the text of the general error region, if rendered.
pub fn general_error_region(page: &str) -> Option<String> {
    region_text(page, "<p class=\"error-message general-error\" role=\"alert\">")
}

/// Returns the submit button tag.
pub fn submit_button(page: &str) -> Option<&str> {
    let at = page.find("data-testid=\"contact-form-submit\"")?;
    let start = page[..at].rfind('<')?;
    let end = at + page[at..].find("</button>")?;
    Some(&page[start..end])
}

/// Returns the paragraph text following `opening`.
fn region_text(page: &str, opening: &str) -> Option<String> {
    let start = page.find(opening)? + opening.len();
    let end = page[start..].find("</p>")?;
    Some(page[start..start + end].to_string())
}
