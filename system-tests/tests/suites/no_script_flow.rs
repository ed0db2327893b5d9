// system-tests/tests/suites/no_script_flow.rs
// ============================================================================
// Module: No-Script Flow Suite
// Description: Plain form posts and full-page responses over HTTP.
// Purpose: Validate the form works completely without client script.
// Dependencies: system-tests helpers, contact-form-server
// ============================================================================

//! No-script submission flow tests.

use contact_form_core::ContactPayload;
use contact_form_core::FieldId;
use contact_form_core::MessageStore;
use helpers::harness::http_client;
use helpers::harness::spawn_memory_server;
use helpers::page::error_region;
use helpers::page::fields_with_errors;
use helpers::page::general_error_region;
use helpers::page::input_marked_invalid;
use helpers::page::input_tag;
use helpers::page::submit_button;
use helpers::page::success_region;
use helpers::requests::get_page;
use helpers::requests::post_form;
use reqwest::header::LOCATION;
use system_tests::config::DEFAULT_TIMEOUT;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn initial_page_offers_an_enabled_form() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let (status, page) = get_page(&client, server.url("/")).await?;

    assert_eq!(status, 200);
    let button = submit_button(&page).ok_or("submit button missing")?;
    assert!(!button.contains("disabled"));
    assert!(button.ends_with(">Skicka"));
    assert!(fields_with_errors(&page).is_empty());
    assert!(success_region(&page).is_none());
    assert!(general_error_region(&page).is_none());
    assert!(page.contains("method=\"post\" action=\"/api/contact\""));

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_email_rerenders_with_error_and_values() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let payload = ContactPayload::new("Hej där", "", true);
    let response = post_form(&client, server.url("/api/contact"), &payload).await?;

    assert_eq!(response.status().as_u16(), 422);
    let page = response.text().await.map_err(|err| err.to_string())?;
    assert_eq!(error_region(&page, FieldId::Email).as_deref(), Some("Ange en email-adress."));
    assert_eq!(fields_with_errors(&page), vec![FieldId::Email]);
    assert!(input_marked_invalid(&page, FieldId::Email));
    assert!(!input_marked_invalid(&page, FieldId::Message));
    assert!(page.contains(">Hej där</textarea>"));
    let terms = input_tag(&page, FieldId::Terms).ok_or("terms input missing")?;
    assert!(terms.contains(" checked"));
    assert!(success_region(&page).is_none());
    assert!(server.store().recent(10).map_err(|err| err.to_string())?.is_empty());

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn valid_post_redirects_to_success_page() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let payload = ContactPayload::new("Hej!", "a@b.se", true);
    let response = post_form(&client, server.url("/api/contact"), &payload).await?;

    assert_eq!(response.status().as_u16(), 303);
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .ok_or("location header missing")?
        .to_string();
    assert_eq!(location, "/?status=success#contact");

    let (status, page) = get_page(&client, server.url(&location)).await?;
    assert_eq!(status, 200);
    assert_eq!(
        success_region(&page).as_deref(),
        Some("Ditt meddelande är mottaget. Vi återkopplar snart.")
    );
    let email = input_tag(&page, FieldId::Email).ok_or("email input missing")?;
    assert!(email.contains("value=\"\""));
    assert_eq!(server.store().recent(10).map_err(|err| err.to_string())?.len(), 1);

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn every_invalid_field_is_reported_at_once() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let payload = ContactPayload::new("   ", "a@@b", false);
    let response = post_form(&client, server.url("/api/contact"), &payload).await?;

    assert_eq!(response.status().as_u16(), 422);
    let page = response.text().await.map_err(|err| err.to_string())?;
    assert_eq!(fields_with_errors(&page), vec![FieldId::Message, FieldId::Email, FieldId::Terms]);
    for field in FieldId::ALL {
        assert!(input_marked_invalid(&page, field), "{} not marked", field.as_str());
    }
    assert_eq!(
        error_region(&page, FieldId::Terms).as_deref(),
        Some("Du måste acceptera villkoren för att skicka meddelandet.")
    );
    assert!(general_error_region(&page).is_none());

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn over_length_message_is_attributed_to_the_message_field() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let payload = ContactPayload::new("a".repeat(5001), "a@b.se", true);
    let response = post_form(&client, server.url("/api/contact"), &payload).await?;

    assert_eq!(response.status().as_u16(), 422);
    let page = response.text().await.map_err(|err| err.to_string())?;
    assert_eq!(
        error_region(&page, FieldId::Message).as_deref(),
        Some("Meddelandet är för långt (max 5000 tecken).")
    );
    assert!(general_error_region(&page).is_none());

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn redirect_error_tokens_render_field_errors() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;

    let (_, page) = get_page(&client, server.url("/?error=MissingMessage&error=EmailTooLong")).await?;
    assert_eq!(fields_with_errors(&page), vec![FieldId::Message, FieldId::Email]);

    let (_, page) = get_page(&client, server.url("/?error=DatabaseError")).await?;
    assert_eq!(
        general_error_region(&page).as_deref(),
        Some("Ett serverfel uppstod: Okänt databasfel")
    );
    assert!(fields_with_errors(&page).is_empty());

    server.shutdown().await;
    Ok(())
}
