// system-tests/tests/suites/channel_parity.rs
// ============================================================================
// Module: Channel Parity Suite
// Description: Same payloads through the scripted and no-script channels.
// Purpose: Ensure both presentation paths report identical outcomes.
// Dependencies: system-tests helpers, contact-form-client
// ============================================================================

//! Scripted and no-script channel parity tests.

use contact_form_client::HttpSubmissionTransport;
use contact_form_client::SubmissionTransport;
use contact_form_core::ContactPayload;
use contact_form_core::ContactService;
use contact_form_core::FieldId;
use contact_form_core::MessageStore;
use helpers::harness::http_client;
use helpers::harness::spawn_memory_server;
use helpers::page::error_region;
use helpers::page::fields_with_errors;
use helpers::requests::post_form;
use system_tests::config::DEFAULT_TIMEOUT;

use crate::helpers;

/// Payloads covering acceptance and every rejection.
fn corpus() -> Vec<ContactPayload> {
    vec![
        ContactPayload::new("Hej", "a@b.se", true),
        ContactPayload::new("  Hej  ", "  a@b.se  ", true),
        ContactPayload::new("", "a@b.se", true),
        ContactPayload::new("Hej", "", true),
        ContactPayload::new("Hej", "a.b.se", true),
        ContactPayload::new("Hej", "a@b.se", false),
        ContactPayload::new("a".repeat(5001), "a@b.se", true),
        ContactPayload::new("Hej", format!("{}@b.se", "a".repeat(251)), true),
        ContactPayload::new(" ", " ", false),
    ]
}

#[tokio::test(flavor = "multi_thread")]
async fn both_channels_reach_the_same_verdict() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let mut accepted = 0usize;

    for payload in corpus() {
        let expected = ContactService::check(&payload);
        let scripted = transport.send(&payload).await.map_err(|err| err.to_string())?;
        if scripted != expected {
            return Err(format!("scripted result differs for {payload:?}: {scripted:?}"));
        }

        let response = post_form(&client, server.url("/api/contact"), &payload).await?;
        if expected.is_success() {
            accepted += 2;
            if response.status().as_u16() != 303 {
                return Err(format!("no-script success expected for {payload:?}"));
            }
            continue;
        }
        let page = response.text().await.map_err(|err| err.to_string())?;
        if fields_with_errors(&page) != expected.rejected_fields() {
            return Err(format!("no-script fields differ for {payload:?}"));
        }
        for field in FieldId::ALL {
            let scripted_text = expected.error_for(field).map(|error| error.message.clone());
            if error_region(&page, field) != scripted_text {
                return Err(format!("{} error text differs for {payload:?}", field.as_str()));
            }
        }
    }

    let stored = server.store().recent(100).map_err(|err| err.to_string())?;
    assert_eq!(stored.len(), accepted);
    assert!(stored.iter().all(|stored| stored.message.message == "Hej"));

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn padded_no_script_post_within_the_body_limit_is_accepted() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let padded = ContactPayload::new(format!("Hej{}", " ".repeat(6_000)), " a@b.se ", true);
    assert!(ContactService::check(&padded).is_success());

    let response = post_form(&client, server.url("/api/contact"), &padded).await?;
    assert_eq!(response.status().as_u16(), 303);
    let stored = server.store().recent(10).map_err(|err| err.to_string())?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message.message, "Hej");

    server.shutdown().await;
    Ok(())
}
