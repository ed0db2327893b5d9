// system-tests/tests/suites/scripted_flow.rs
// ============================================================================
// Module: Scripted Flow Suite
// Description: Enhanced submissions through the client controller over HTTP.
// Purpose: Validate gating, outcomes, and server authority end to end.
// Dependencies: system-tests helpers, contact-form-client
// ============================================================================

//! Scripted submission flow tests.

use std::time::Duration;
use std::time::Instant;

use contact_form_client::FieldEvent;
use contact_form_client::HttpSubmissionTransport;
use contact_form_client::SubmissionController;
use contact_form_client::SubmissionTransport;
use contact_form_core::ContactPayload;
use contact_form_core::ContactService;
use contact_form_core::FieldId;
use contact_form_core::FieldRejection;
use contact_form_core::FieldValue;
use contact_form_core::MessageStore;
use contact_form_core::SubmissionPhase;
use contact_form_core::SubmissionResult;
use helpers::harness::spawn_memory_server;
use helpers::harness::unused_loopback_addr;
use url::Url;

use crate::helpers;

/// Types `payload` into `controller` field by field.
fn type_payload(controller: &mut SubmissionController, payload: &ContactPayload) {
    for field in FieldId::ALL {
        let _ = controller.handle(FieldEvent::Input(field, payload.value(field)));
        let _ = controller.handle(FieldEvent::Blur(field));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn scripted_submission_succeeds_and_resets_form() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let mut controller = SubmissionController::new(Duration::from_secs(5));

    assert!(!controller.submit_enabled());
    type_payload(&mut controller, &ContactPayload::new("Hej, jag vill veta mer.", "a@b.se", true));
    assert!(controller.submit_enabled());

    let started = Instant::now();
    let phase = controller.submit(&transport, started).await.map_err(|err| err.to_string())?;
    assert_eq!(phase, SubmissionPhase::Succeeded);
    assert!(controller.engine().success_visible());
    assert_eq!(controller.engine().state().value(FieldId::Message), FieldValue::text(""));
    assert!(!controller.submit_enabled());

    let stored = server.store().recent(10).map_err(|err| err.to_string())?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message.email, "a@b.se");

    assert!(!controller.expire(started + Duration::from_secs(1)));
    assert!(controller.expire(started + Duration::from_secs(6)));
    assert!(!controller.engine().success_visible());

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn client_gating_blocks_invalid_form_before_network() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let mut controller = SubmissionController::default();
    type_payload(&mut controller, &ContactPayload::new("Hej", "not-an-email", true));

    assert!(!controller.submit_enabled());
    assert!(controller.submit(&transport, Instant::now()).await.is_err());
    let hint = controller.engine().hint(FieldId::Email).map(|hint| hint.text);
    assert_eq!(hint, Some("Ange en giltig email."));
    assert!(server.store().recent(10).map_err(|err| err.to_string())?.is_empty());

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn server_rejects_requests_that_bypass_the_client() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;

    let result = transport
        .send(&ContactPayload::new("", "x@", false))
        .await
        .map_err(|err| err.to_string())?;
    assert_eq!(result.rejected_fields(), vec![FieldId::Message, FieldId::Email, FieldId::Terms]);
    assert_eq!(
        result.error_for(FieldId::Email).map(|error| error.message.as_str()),
        Some("Ange en giltig email-adress.")
    );
    assert!(server.store().recent(10).map_err(|err| err.to_string())?.is_empty());

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn length_boundaries_are_enforced_by_the_server() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let domain = "@example.se";
    let local_254 = "a".repeat(254 - domain.len());
    let local_255 = "a".repeat(255 - domain.len());

    let cases = [
        (ContactPayload::new("a".repeat(5000), "a@b.se", true), None),
        (
            ContactPayload::new("a".repeat(5001), "a@b.se", true),
            Some(FieldRejection::MessageTooLong),
        ),
        (ContactPayload::new("Hej", format!("{local_254}{domain}"), true), None),
        (
            ContactPayload::new("Hej", format!("{local_255}{domain}"), true),
            Some(FieldRejection::EmailTooLong),
        ),
    ];
    for (payload, expected) in cases {
        let result = transport.send(&payload).await.map_err(|err| err.to_string())?;
        let rejection = FieldId::ALL
            .into_iter()
            .find_map(|field| result.error_for(field).map(|error| error.kind));
        if rejection != expected {
            return Err(format!("expected {expected:?}, got {result:?}"));
        }
    }
    assert_eq!(server.store().recent(10).map_err(|err| err.to_string())?.len(), 2);

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_surfaces_general_error() -> Result<(), String> {
    let addr = unused_loopback_addr()?;
    let base = Url::parse(&format!("http://{addr}/")).map_err(|err| err.to_string())?;
    let transport = HttpSubmissionTransport::with_timeout(&base, Duration::from_secs(2))
        .map_err(|err| err.to_string())?;
    let mut controller = SubmissionController::default();
    type_payload(&mut controller, &ContactPayload::new("Hej", "a@b.se", true));

    let phase = controller.submit(&transport, Instant::now()).await.map_err(|err| err.to_string())?;
    assert_eq!(phase, SubmissionPhase::Failed);
    assert_eq!(
        controller.engine().general_error(),
        Some("Ett serverfel uppstod: Kunde inte nå servern.")
    );
    assert_eq!(controller.engine().state().value(FieldId::Email), FieldValue::text("a@b.se"));
    assert!(controller.submit_enabled());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn identical_submissions_are_each_accepted() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let payload = ContactPayload::new("Samma meddelande", "a@b.se", true);

    let first = transport.send(&payload).await.map_err(|err| err.to_string())?;
    let second = transport.send(&payload).await.map_err(|err| err.to_string())?;
    assert_eq!(first, SubmissionResult::Success);
    assert_eq!(first, second);
    assert_eq!(server.store().recent(10).map_err(|err| err.to_string())?.len(), 2);

    server.shutdown().await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn heavily_padded_input_is_sent_trimmed() -> Result<(), String> {
    let server = spawn_memory_server().await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let mut controller = SubmissionController::default();
    let padded = ContactPayload::new(format!("Hej{}", " ".repeat(70_000)), "  a@b.se\n", true);
    assert_eq!(ContactService::check(&padded), SubmissionResult::Success);

    type_payload(&mut controller, &padded);
    assert!(controller.submit_enabled());
    let phase = controller.submit(&transport, Instant::now()).await.map_err(|err| err.to_string())?;
    assert_eq!(phase, SubmissionPhase::Succeeded);

    let stored = server.store().recent(10).map_err(|err| err.to_string())?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message.message, "Hej");
    assert_eq!(stored[0].message.email, "a@b.se");

    server.shutdown().await;
    Ok(())
}
